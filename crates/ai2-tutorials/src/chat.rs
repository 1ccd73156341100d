/// The AI tutor chat: an ordered transcript and a three-state send cycle.
///
/// `submit` and `complete` are split so an owner can release its lock while
/// the gateway call is in flight; a second `submit` during that window is
/// rejected rather than queued.
use tracing::{debug, warn};

use crate::gateway::{GatewayError, TutorGateway};
use crate::model::{ChatMessage, Role};

pub const WELCOME_MESSAGE: &str =
    "你好！我是你的 App Inventor AI 導師。遇到卡關的積木或邏輯問題嗎？歡迎問我！";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    Sending,
    /// Idle, but the last reply was a fallback message.
    IdleWithError,
}

impl ChatState {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatState::Idle => "idle",
            ChatState::Sending => "sending",
            ChatState::IdleWithError => "idle_with_error",
        }
    }
}

/// A user turn accepted by `submit` and awaiting a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub message: String,
    /// Transcript as it was before `message` was appended.
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default)]
pub struct ChatClient {
    transcript: Vec<ChatMessage>,
    state: ChatState,
}

impl ChatClient {
    /// Empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript opened by the tutor's welcome message.
    pub fn with_greeting() -> Self {
        Self {
            transcript: vec![ChatMessage::new(Role::Model, WELCOME_MESSAGE)],
            state: ChatState::Idle,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == ChatState::Sending
    }

    /// Append the user's message and enter `Sending`.
    ///
    /// Returns `None` without touching the transcript when the input is blank
    /// or a reply is still outstanding.
    pub fn submit(&mut self, input: &str) -> Option<PendingTurn> {
        if input.trim().is_empty() {
            debug!("ignoring blank chat input");
            return None;
        }
        if self.is_sending() {
            debug!("ignoring chat input while a reply is pending");
            return None;
        }

        let history = self.transcript.clone();
        self.transcript.push(ChatMessage::new(Role::User, input));
        self.state = ChatState::Sending;
        Some(PendingTurn {
            message: input.to_string(),
            history,
        })
    }

    /// Append the tutor's reply (or the fallback text for a failure) and
    /// return to idle. Ignored unless a turn is pending.
    pub fn complete(&mut self, reply: Result<String, GatewayError>) -> Option<&ChatMessage> {
        if !self.is_sending() {
            warn!("chat reply arrived with no pending turn, dropping it");
            return None;
        }

        let (text, state) = match reply {
            Ok(text) => (text, ChatState::Idle),
            Err(e) => (e.user_message().to_string(), ChatState::IdleWithError),
        };
        self.transcript.push(ChatMessage::new(Role::Model, text));
        self.state = state;
        self.transcript.last()
    }

    /// Submit, ask the gateway, and record the reply.
    pub async fn send(
        &mut self,
        input: &str,
        gateway: &dyn TutorGateway,
    ) -> Option<&ChatMessage> {
        let turn = self.submit(input)?;
        let reply = gateway.reply(&turn.message, &turn.history).await;
        self.complete(reply)
    }

    /// Start over with a fresh greeting. Refused while a reply is pending.
    pub fn reset(&mut self) -> bool {
        if self.is_sending() {
            return false;
        }
        *self = Self::with_greeting();
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Gateway stub that records its calls and answers with a fixed result.
    struct RecordingGateway {
        calls: Mutex<Vec<(String, Vec<(Role, String)>)>>,
        fail: bool,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TutorGateway for RecordingGateway {
        async fn reply(
            &self,
            message: &str,
            history: &[ChatMessage],
        ) -> Result<String, GatewayError> {
            let history = history.iter().map(|m| (m.role, m.text.clone())).collect();
            self.calls
                .lock()
                .unwrap()
                .push((message.to_string(), history));
            if self.fail {
                Err(GatewayError::MissingCredential)
            } else {
                Ok("Hi".to_string())
            }
        }
    }

    fn turns(client: &ChatClient) -> Vec<(Role, &str)> {
        client
            .transcript()
            .iter()
            .map(|m| (m.role, m.text.as_str()))
            .collect()
    }

    #[tokio::test]
    async fn hello_hi_exchange() {
        let gateway = RecordingGateway::new();
        let mut client = ChatClient::new();

        let reply = client.send("Hello", &gateway).await.expect("accepted");
        assert_eq!(reply.role, Role::Model);
        assert_eq!(reply.text, "Hi");

        let expected: Vec<(String, Vec<(Role, String)>)> = vec![("Hello".to_string(), vec![])];
        assert_eq!(*gateway.calls.lock().unwrap(), expected);
        assert_eq!(turns(&client), vec![(Role::User, "Hello"), (Role::Model, "Hi")]);
        assert_eq!(client.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn history_excludes_the_new_message() {
        let gateway = RecordingGateway::new();
        let mut client = ChatClient::with_greeting();
        client.send("first", &gateway).await.expect("accepted");
        client.send("second", &gateway).await.expect("accepted");

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls[0].1, vec![(Role::Model, WELCOME_MESSAGE.to_string())]);
        assert_eq!(
            calls[1].1,
            vec![
                (Role::Model, WELCOME_MESSAGE.to_string()),
                (Role::User, "first".to_string()),
                (Role::Model, "Hi".to_string()),
            ]
        );
        assert_eq!(client.transcript().len(), 5);
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let gateway = RecordingGateway::new();
        let mut client = ChatClient::new();
        for input in ["", "   ", "\n\t"] {
            assert!(client.send(input, &gateway).await.is_none());
        }
        assert!(client.transcript().is_empty());
        assert_eq!(gateway.call_count(), 0);
        assert_eq!(client.state(), ChatState::Idle);
    }

    #[test]
    fn submit_while_sending_is_a_no_op() {
        let mut client = ChatClient::new();
        let turn = client.submit("Hello").expect("accepted");
        assert_eq!(turn.message, "Hello");
        assert!(turn.history.is_empty());
        assert_eq!(client.state(), ChatState::Sending);

        assert!(client.submit("again").is_none());
        assert_eq!(client.transcript().len(), 1);

        client.complete(Ok("Hi".to_string())).expect("pending turn");
        assert_eq!(client.state(), ChatState::Idle);
        assert!(client.submit("again").is_some());
    }

    #[tokio::test]
    async fn failure_appends_fallback_and_marks_error_state() {
        let gateway = RecordingGateway::failing();
        let mut client = ChatClient::new();
        let reply = client.send("Hello", &gateway).await.expect("accepted");
        assert_eq!(reply.text, crate::gateway::MISSING_CREDENTIAL_MESSAGE);
        assert_eq!(client.state(), ChatState::IdleWithError);

        // the next successful turn clears the error state
        let gateway = RecordingGateway::new();
        client.send("retry", &gateway).await.expect("accepted");
        assert_eq!(client.state(), ChatState::Idle);
    }

    #[test]
    fn complete_without_pending_turn_is_ignored() {
        let mut client = ChatClient::new();
        assert!(client.complete(Ok("stray".to_string())).is_none());
        assert!(client.transcript().is_empty());
    }

    #[test]
    fn reset_restores_greeting_unless_sending() {
        let mut client = ChatClient::with_greeting();
        client.submit("Hello").expect("accepted");
        assert!(!client.reset());
        assert_eq!(client.transcript().len(), 2);

        client.complete(Ok("Hi".to_string()));
        assert!(client.reset());
        assert_eq!(turns(&client), vec![(Role::Model, WELCOME_MESSAGE)]);
        assert_eq!(client.state(), ChatState::Idle);
    }

    #[test]
    fn message_text_is_kept_as_typed() {
        let mut client = ChatClient::new();
        let turn = client.submit("  spaced  ").expect("accepted");
        assert_eq!(turn.message, "  spaced  ");
        assert_eq!(client.transcript()[0].text, "  spaced  ");
    }
}
