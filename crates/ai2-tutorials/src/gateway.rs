/// Adapter between the chat client and the Gemini API.
///
/// Replies are typed (`Result<String, GatewayError>`) inside the crate; the
/// chat client collapses errors into fixed learner-facing strings.
use async_trait::async_trait;
use tracing::{error, info};

use tutor_common::gemini::{Content, ContentGenerator, GeminiClientError, GenerateContentRequest};

use crate::model::{ChatMessage, Role};

pub const SYSTEM_INSTRUCTION: &str = "\
你是一位精通 MIT App Inventor 2 的專家導師。
你的目標是協助學生學習積木程式設計 (Block-based coding)、邏輯與 App 設計。
請遵守以下原則：
1. **使用繁體中文 (Traditional Chinese) 回答**。
2. 解釋概念時，請使用 App Inventor 的中文術語（例如：「當 按鈕1.被點選 執行...」）。
3. 如果使用者詢問程式碼，請以描述「如何拖拉積木」的方式呈現邏輯，而非直接給出 Java 程式碼。
4. 語氣要鼓勵且簡潔。
5. 若被問及進階主題（如擴充元件 Extension 或 API），請清楚解釋。
6. 除非使用者明確要求比較，否則不要提供 Java 或 Swift 程式碼。
";

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "錯誤：找不到 API Key。請確認應用程式已設定有效的 Google Gemini API Key。";
pub const EMPTY_REPLY_MESSAGE: &str = "無法產生回應，請再試一次。";
pub const FALLBACK_MESSAGE: &str =
    "抱歉，連線到 AI 導師時發生錯誤。請檢查您的網路連線或 API Key 設定。";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no API key configured")]
    MissingCredential,

    #[error(transparent)]
    Request(#[from] GeminiClientError),

    #[error("model returned no text")]
    EmptyReply,
}

impl GatewayError {
    /// The fixed text shown in the transcript in place of a reply.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            Self::EmptyReply => EMPTY_REPLY_MESSAGE,
            Self::Request(_) => FALLBACK_MESSAGE,
        }
    }
}

/// Produces a tutor reply for `message` given the prior transcript.
#[async_trait]
pub trait TutorGateway: Send + Sync {
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> Result<String, GatewayError>;
}

pub struct GeminiGateway<G> {
    generator: G,
    api_key: Option<String>,
}

impl<G: ContentGenerator> GeminiGateway<G> {
    /// Blank keys count as missing.
    pub fn new(generator: G, api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self { generator, api_key }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl<G: ContentGenerator> TutorGateway for GeminiGateway<G> {
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> Result<String, GatewayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            info!("tutor reply skipped: no API key configured");
            return Err(GatewayError::MissingCredential);
        };

        let request = build_request(message, history);
        let response = self
            .generator
            .generate_content(api_key, &request)
            .await
            .inspect_err(|e| error!(error = %e, "gemini request failed"))?;

        response.text().ok_or(GatewayError::EmptyReply)
    }
}

/// System instruction first, then the transcript, then the new user turn.
pub fn build_request(message: &str, history: &[ChatMessage]) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|m| match m.role {
            Role::User => Content::user(m.text.clone()),
            Role::Model => Content::model(m.text.clone()),
        })
        .collect();
    contents.push(Content::user(message));

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content::system(SYSTEM_INSTRUCTION)),
    }
}
