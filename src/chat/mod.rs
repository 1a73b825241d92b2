//! Chat escalation: the adapter between the app and a hosted chat assistant.
//!
//! - `collaborator`: the external boundary (`create_session`, `send`)
//! - `gemini`: collaborator backed by the hosted generative-language REST API
//! - `prompt`: fixed system instruction and symptom seed formatting
//! - `adapter`: fallback-on-failure wrapper used by the rest of the app

pub mod adapter;
pub mod collaborator;
pub mod gemini;
pub mod prompt;

pub use adapter::{ChatEscalationAdapter, FALLBACK_MESSAGE, NO_REPLY_MESSAGE};
pub use collaborator::{ChatCollaborator, ChatSession, RemoteCallFailure};
pub use gemini::GeminiCollaborator;
