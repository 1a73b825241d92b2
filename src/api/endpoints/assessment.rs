//! Assessment endpoints.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, PreviewResponse};
use crate::models::AssessmentOutcome;

/// `POST /api/assessment/preview`: classify the selection, record nothing.
pub async fn preview(State(ctx): State<ApiContext>) -> Result<Json<PreviewResponse>, ApiError> {
    let assessment = ctx.engine.preview_assessment()?;
    Ok(Json(PreviewResponse { assessment }))
}

/// `POST /api/assessment/complete`: record the assessment; may escalate to chat.
///
/// Answers without waiting for the chat seed reply; it shows up in the transcript.
pub async fn complete(
    State(ctx): State<ApiContext>,
) -> Result<Json<AssessmentOutcome>, ApiError> {
    Ok(Json(ctx.engine.complete_assessment()?))
}
