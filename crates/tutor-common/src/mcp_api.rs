use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListTutorialsParams {
    /// Difficulty filter: "beginner", "intermediate", "advanced" (or the labels
    /// "初級", "中級", "進階"). Omit or use "all" for no filter.
    pub difficulty: Option<String>,
    /// Category label such as "基礎" or "遊戲". Omit or use "all" for no filter.
    pub category: Option<String>,
    /// Case-insensitive text matched against title and description.
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTutorialParams {
    /// Tutorial ID such as "b1" or "a2".
    pub tutorial_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OpenViewParams {
    /// Address of a view: "/", "/learn" or "/watch/{id}".
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatSendParams {
    /// The question for the AI tutor.
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TutorialSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub difficulty_label: String,
    pub category: String,
    pub duration: String,
    pub tags: Vec<String>,
    /// Address of the detail view for this tutorial.
    pub watch_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TutorialDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub youtube_id: String,
    pub embed_url: String,
    pub difficulty: String,
    pub difficulty_label: String,
    pub category: String,
    pub duration: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppliedFilters {
    pub difficulty: String,
    pub category: String,
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TutorialListResponse {
    /// Number of tutorials in the whole catalog.
    pub total: usize,
    pub filters: AppliedFilters,
    pub tutorials: Vec<TutorialSummary>,
    /// True when at least one filter is active and could be cleared.
    pub can_reset: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TutorialDetailResponse {
    pub found: bool,
    pub tutorial: Option<TutorialDetail>,
    pub related: Vec<TutorialSummary>,
    /// Address to navigate back to the tutorial list.
    pub back_to: String,
    /// Set when the tutorial was not found.
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: String,
    pub tutorial_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DifficultyInfo {
    pub key: String,
    pub label: String,
    pub tutorial_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
    pub difficulties: Vec<DifficultyInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewResponse {
    /// "home", "learn" or "watch".
    pub view: String,
    pub path: String,
    /// Featured tutorials on the landing view.
    pub featured: Option<Vec<TutorialSummary>>,
    /// Full list on the learn view.
    pub list: Option<TutorialListResponse>,
    pub options: Option<CategoryListResponse>,
    /// Detail (or not-found state) on the watch view.
    pub detail: Option<TutorialDetailResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessageView {
    pub id: String,
    /// "user" or "model".
    pub role: String,
    pub text: String,
    /// Unix milliseconds.
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatSendResponse {
    /// False when the message was empty or another message was still being answered.
    pub accepted: bool,
    /// "idle", "sending" or "idle_with_error".
    pub state: String,
    pub reply: Option<ChatMessageView>,
    pub transcript_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatTranscriptResponse {
    pub state: String,
    pub messages: Vec<ChatMessageView>,
}
