use chrono::Utc;
use serde::{Serialize, Deserialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub origin: Origin,
    pub timestamp: i64,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Origin::User)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, Origin::Assistant)
    }

    fn new(content: impl Into<String>, origin: Origin) -> Self {
        Self {
            content: content.into(),
            origin,
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// Body of `POST /api/ai-chat`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatReply {
    pub response: String,
}
