//! Chat endpoints.
//!
//! - `POST /api/chat/send`: send a message, answer with the assistant reply
//! - `GET /api/chat/transcript`: current session turns
//! - `GET /api/chat/quick-replies`: suggested one-tap messages

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ChatSendRequest, ChatSendResponse, TranscriptResponse};
use crate::chat::prompt::QUICK_REPLIES;

const MAX_MESSAGE_CHARS: usize = 2000;

/// `POST /api/chat/send`. Remote failures still answer 200 with the fallback reply.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<ChatSendRequest>,
) -> Result<Json<ChatSendResponse>, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".into()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Message too long (max {MAX_MESSAGE_CHARS} chars)"
        )));
    }

    let reply = ctx.engine.send_chat_message(message).await;
    Ok(Json(ChatSendResponse { reply }))
}

/// `GET /api/chat/transcript`
pub async fn transcript(State(ctx): State<ApiContext>) -> Json<TranscriptResponse> {
    Json(TranscriptResponse {
        messages: ctx.engine.transcript(),
    })
}

#[derive(Serialize)]
pub struct QuickRepliesResponse {
    pub replies: &'static [&'static str],
}

/// `GET /api/chat/quick-replies`
pub async fn quick_replies() -> Json<QuickRepliesResponse> {
    Json(QuickRepliesResponse {
        replies: QUICK_REPLIES,
    })
}
