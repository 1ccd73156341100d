use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Skill level of a tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Stable machine key, e.g. "beginner".
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Display label shown to learners.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "初級",
            Difficulty::Intermediate => "中級",
            Difficulty::Advanced => "進階",
        }
    }

    /// Accepts the machine key (any ASCII case) or the display label.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(raw) || d.label() == raw)
            .ok_or_else(|| AppError::UnknownDifficulty(raw.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry describing a single instructional video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialRecord {
    /// Unique identifier, e.g. "b1"
    pub id: String,
    pub title: String,
    pub description: String,
    /// YouTube video ID used for the embedded player
    pub youtube_id: String,
    pub difficulty: Difficulty,
    /// Category label, e.g. "基礎"
    pub category: String,
    /// Display duration, e.g. "12:30"
    pub duration: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TutorialRecord {
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.youtube_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A single turn in the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Unix milliseconds
    pub timestamp: u64,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: tutor_common::ids::new_message_id(),
            role,
            text: text.into(),
            timestamp: tutor_common::ids::now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_keys_and_labels() {
        assert_eq!(Difficulty::parse("beginner").unwrap(), Difficulty::Beginner);
        assert_eq!(Difficulty::parse("ADVANCED").unwrap(), Difficulty::Advanced);
        assert_eq!(Difficulty::parse("中級").unwrap(), Difficulty::Intermediate);
        assert_eq!(Difficulty::parse(" 進階 ").unwrap(), Difficulty::Advanced);
        assert!(matches!(
            Difficulty::parse("expert"),
            Err(AppError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn difficulty_serializes_as_key() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            "\"intermediate\""
        );
        assert_eq!(Difficulty::Beginner.to_string(), "初級");
    }

    #[test]
    fn embed_url_uses_youtube_id() {
        let record = TutorialRecord {
            id: "x".to_string(),
            title: String::new(),
            description: String::new(),
            youtube_id: "abc123".to_string(),
            difficulty: Difficulty::Beginner,
            category: String::new(),
            duration: String::new(),
            tags: vec![],
        };
        assert_eq!(record.embed_url(), "https://www.youtube.com/embed/abc123");
    }

    #[test]
    fn chat_messages_get_distinct_ids() {
        let a = ChatMessage::new(Role::User, "a");
        let b = ChatMessage::new(Role::Model, "b");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role.as_str(), "user");
        assert_eq!(b.role.as_str(), "model");
    }
}
