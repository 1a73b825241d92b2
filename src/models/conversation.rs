use serde::{Deserialize, Serialize};

use super::enums::ChatRole;

/// One turn of a chat session. Scoped to the session, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub role: ChatRole,
    pub text: String,
}

impl ChatExchange {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into() }
    }
}

/// Reply returned by the chat adapter, tagged for correlation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Monotonic per-adapter call identifier.
    pub call_id: u64,
    pub text: String,
    /// The remote call failed and `text` is the fixed fallback message.
    pub is_fallback: bool,
    /// A newer call started before this one finished; callers should drop it.
    pub stale: bool,
}
