/// MCP server for the App Inventor 2 tutorial catalog and AI tutor.
///
/// Exposes seven tools:
/// - `list_tutorials`: Filter the catalog by difficulty, category and text
/// - `get_tutorial`: Detail view of one tutorial with related tutorials
/// - `list_categories`: Category and difficulty options with counts
/// - `open_view`: Render the view behind an address ("/", "/learn", "/watch/{id}")
/// - `chat_send`: Ask the AI tutor a question
/// - `chat_transcript`: Current chat transcript and state
/// - `chat_reset`: Start a fresh chat
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::browser::{CategoryFilter, DifficultyFilter, FilterState};
use crate::catalog::Catalog;
use crate::chat::ChatClient;
use crate::detail::DetailView;
use crate::gateway::TutorGateway;
use crate::model::{ChatMessage, Difficulty, TutorialRecord};
use crate::route::Route;
use tutor_common::mcp_api::{
    AppliedFilters, CategoryInfo, CategoryListResponse, ChatMessageView, ChatSendParams,
    ChatSendResponse, ChatTranscriptResponse, DifficultyInfo, GetTutorialParams,
    ListTutorialsParams, OpenViewParams, TutorialDetail, TutorialDetailResponse,
    TutorialListResponse, TutorialSummary, ViewResponse,
};

const NOT_FOUND_MESSAGE: &str = "找不到教學";

#[derive(Clone)]
pub struct TutorialsServer {
    catalog: Arc<Catalog>,
    chat: Arc<Mutex<ChatClient>>,
    gateway: Arc<dyn TutorGateway>,
    tool_router: ToolRouter<TutorialsServer>,
}

impl TutorialsServer {
    pub fn new(catalog: Arc<Catalog>, gateway: Arc<dyn TutorGateway>) -> Self {
        Self {
            catalog,
            chat: Arc::new(Mutex::new(ChatClient::with_greeting())),
            gateway,
            tool_router: Self::tool_router(),
        }
    }

    fn list_view(&self, filters: &FilterState) -> TutorialListResponse {
        let tutorials = filters
            .apply(&self.catalog)
            .into_iter()
            .map(to_api_summary)
            .collect();

        TutorialListResponse {
            total: self.catalog.len(),
            filters: AppliedFilters {
                difficulty: filters.difficulty.key().to_string(),
                category: filters.category.key().to_string(),
                query: filters.query.clone(),
            },
            tutorials,
            can_reset: !filters.is_default(),
        }
    }

    fn detail_view(&self, id: &str) -> TutorialDetailResponse {
        let view = DetailView::resolve(&self.catalog, id);
        let back_to = view.back_to().path();
        match view {
            DetailView::Found { record, related } => TutorialDetailResponse {
                found: true,
                tutorial: Some(to_api_detail(record)),
                related: related.into_iter().map(to_api_summary).collect(),
                back_to,
                message: None,
            },
            DetailView::NotFound { id, .. } => {
                info!(tutorial_id = %id, "tutorial not found");
                TutorialDetailResponse {
                    found: false,
                    tutorial: None,
                    related: Vec::new(),
                    back_to,
                    message: Some(NOT_FOUND_MESSAGE.to_string()),
                }
            }
        }
    }

    fn options(&self) -> CategoryListResponse {
        CategoryListResponse {
            categories: self
                .catalog
                .categories()
                .iter()
                .map(|key| CategoryInfo {
                    key: key.to_string(),
                    tutorial_count: self.catalog.count_in_category(key),
                })
                .collect(),
            difficulties: Difficulty::ALL
                .into_iter()
                .map(|d| DifficultyInfo {
                    key: d.key().to_string(),
                    label: d.label().to_string(),
                    tutorial_count: self.catalog.count_with_difficulty(d),
                })
                .collect(),
        }
    }

    async fn transcript_response(&self) -> ChatTranscriptResponse {
        let chat = self.chat.lock().await;
        ChatTranscriptResponse {
            state: chat.state().as_str().to_string(),
            messages: chat.transcript().iter().map(to_api_message).collect(),
        }
    }
}

#[tool_router]
impl TutorialsServer {
    #[tool(description = "List App Inventor 2 video tutorials. Optional single-select filters: difficulty (beginner/intermediate/advanced), category (e.g. '基礎', '遊戲'), and a case-insensitive text query over title and description.")]
    async fn list_tutorials(
        &self,
        Parameters(params): Parameters<ListTutorialsParams>,
    ) -> Result<Json<TutorialListResponse>, String> {
        let difficulty = DifficultyFilter::parse(params.difficulty.as_deref()).map_err(|e| {
            let available: Vec<&str> = Difficulty::ALL.iter().map(|d| d.key()).collect();
            format!("{e}. Available difficulties: all, {}", available.join(", "))
        })?;
        let category = CategoryFilter::parse(params.category.as_deref());
        if let CategoryFilter::Only(label) = &category {
            if !self.catalog.categories().contains(label) {
                debug!(category = %label, "category filter matches no catalog category");
            }
        }
        let filters = FilterState::new(difficulty, category, params.query.unwrap_or_default());

        Ok(Json(self.list_view(&filters)))
    }

    #[tool(description = "Get one tutorial by ID (e.g. 'b1', 'a2') with its video embed URL and up to 3 related tutorials from the same category. Unknown IDs return found=false with a link back to the list.")]
    async fn get_tutorial(
        &self,
        Parameters(params): Parameters<GetTutorialParams>,
    ) -> Result<Json<TutorialDetailResponse>, String> {
        let tutorial_id = params.tutorial_id.trim().to_string();
        if tutorial_id.is_empty() {
            return Err("tutorial_id must not be empty".to_string());
        }
        Ok(Json(self.detail_view(&tutorial_id)))
    }

    #[tool(description = "List tutorial categories and difficulty levels with the number of tutorials in each.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        Ok(Json(self.options()))
    }

    #[tool(description = "Open a view by address: '/' (landing page with featured tutorials), '/learn' (full tutorial list) or '/watch/{id}' (tutorial detail).")]
    async fn open_view(
        &self,
        Parameters(params): Parameters<OpenViewParams>,
    ) -> Result<Json<ViewResponse>, String> {
        let route = Route::parse(&params.path)
            .map_err(|e| format!("{e}. Available views: /, /learn, /watch/{{id}}"))?;

        let mut response = ViewResponse {
            view: route.view_name().to_string(),
            path: route.path(),
            featured: None,
            list: None,
            options: None,
            detail: None,
        };
        match &route {
            Route::Home => {
                response.featured =
                    Some(self.catalog.featured().iter().map(to_api_summary).collect());
            }
            Route::Learn => {
                response.list = Some(self.list_view(&FilterState::default()));
                response.options = Some(self.options());
            }
            Route::Watch(id) => {
                response.detail = Some(self.detail_view(id));
            }
        }
        Ok(Json(response))
    }

    #[tool(description = "Ask the App Inventor AI tutor a question. The whole conversation so far is sent along. Blank messages, and messages sent while the previous answer is still pending, are ignored (accepted=false).")]
    async fn chat_send(
        &self,
        Parameters(params): Parameters<ChatSendParams>,
    ) -> Result<Json<ChatSendResponse>, String> {
        let turn = {
            let mut chat = self.chat.lock().await;
            match chat.submit(&params.message) {
                Some(turn) => turn,
                None => {
                    return Ok(Json(ChatSendResponse {
                        accepted: false,
                        state: chat.state().as_str().to_string(),
                        reply: None,
                        transcript_len: chat.transcript().len(),
                    }));
                }
            }
        };

        // Lock released while waiting so the pending state stays observable.
        let reply = self.gateway.reply(&turn.message, &turn.history).await;

        let mut chat = self.chat.lock().await;
        let reply = chat.complete(reply).map(to_api_message);
        Ok(Json(ChatSendResponse {
            accepted: true,
            state: chat.state().as_str().to_string(),
            reply,
            transcript_len: chat.transcript().len(),
        }))
    }

    #[tool(description = "Get the AI tutor chat transcript (oldest first) and whether a reply is pending.")]
    async fn chat_transcript(&self) -> Result<Json<ChatTranscriptResponse>, String> {
        Ok(Json(self.transcript_response().await))
    }

    #[tool(description = "Clear the AI tutor chat and start over with the welcome message. Fails while a reply is pending.")]
    async fn chat_reset(&self) -> Result<Json<ChatTranscriptResponse>, String> {
        if !self.chat.lock().await.reset() {
            return Err("a reply is still pending; try again once it arrives".to_string());
        }
        info!("chat transcript reset");
        Ok(Json(self.transcript_response().await))
    }
}

fn to_api_summary(record: &TutorialRecord) -> TutorialSummary {
    TutorialSummary {
        id: record.id.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        difficulty: record.difficulty.key().to_string(),
        difficulty_label: record.difficulty.label().to_string(),
        category: record.category.clone(),
        duration: record.duration.clone(),
        tags: record.tags.clone(),
        watch_path: Route::Watch(record.id.clone()).path(),
    }
}

fn to_api_detail(record: &TutorialRecord) -> TutorialDetail {
    TutorialDetail {
        id: record.id.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        youtube_id: record.youtube_id.clone(),
        embed_url: record.embed_url(),
        difficulty: record.difficulty.key().to_string(),
        difficulty_label: record.difficulty.label().to_string(),
        category: record.category.clone(),
        duration: record.duration.clone(),
        tags: record.tags.clone(),
    }
}

fn to_api_message(message: &ChatMessage) -> ChatMessageView {
    ChatMessageView {
        id: message.id.clone(),
        role: message.role.as_str().to_string(),
        text: message.text.clone(),
        timestamp: message.timestamp,
    }
}

#[tool_handler]
impl ServerHandler for TutorialsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ai2-tutorials".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "MIT App Inventor 2 tutorial catalog with an AI tutor. Use list_tutorials to \
browse and filter, get_tutorial for a single tutorial and related ones, list_categories for the \
available filters, and open_view to render '/', '/learn' or '/watch/{id}'. Ask the tutor with \
chat_send; inspect or clear the conversation with chat_transcript and chat_reset."
                    .to_string(),
            ),
        }
    }
}
