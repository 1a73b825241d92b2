//! External chat collaborator boundary.
//!
//! A collaborator creates sessions bound to a system instruction and a
//! temperature; a session sends one user message at a time and returns the
//! assistant's reply. Sessions keep their own conversation history.

use async_trait::async_trait;

/// Why a remote chat call failed. Never shown to the student.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteCallFailure {
    #[error("No API key configured for the chat service")]
    MissingApiKey,
    #[error("Cannot connect to chat service at {0}")]
    Connection(String),
    #[error("Chat request timed out after {0}s")]
    Timeout(u64),
    #[error("Chat request failed: {0}")]
    Request(String),
    #[error("Chat service returned error (status {status}): {body}")]
    Http { status: u16, body: String },
    #[error("Failed to parse chat response: {0}")]
    Parse(String),
}

impl RemoteCallFailure {
    /// Short machine-readable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "auth",
            Self::Http { status: 401 | 403, .. } => "auth",
            Self::Http { status: 429, .. } => "quota",
            Self::Http { .. } => "http",
            Self::Connection(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::Request(_) => "request",
            Self::Parse(_) => "parse",
        }
    }
}

/// Factory for chat sessions.
pub trait ChatCollaborator: Send + Sync {
    fn create_session(&self, system_instruction: &str, temperature: f32) -> Box<dyn ChatSession>;
}

/// One conversation with the hosted assistant.
#[async_trait]
pub trait ChatSession: Send {
    /// Send a user message and return the reply text (may be empty).
    async fn send(&mut self, message: &str) -> Result<String, RemoteCallFailure>;
}
