//! Shared types for the API layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::controller::SessionSnapshot;
use crate::engine::CareEngine;
use crate::models::{AppView, Assessment, ChatExchange, ChatReply};

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub engine: Arc<CareEngine>,
}

impl ApiContext {
    pub fn new(engine: Arc<CareEngine>) -> Self {
        Self { engine }
    }
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub view: AppView,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: String,
    pub selected: bool,
    pub state: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub assessment: Assessment,
}

#[derive(Debug, Deserialize)]
pub struct ChatSendRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatSendResponse {
    pub reply: ChatReply,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub messages: Vec<ChatExchange>,
}
