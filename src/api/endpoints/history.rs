//! Consultation history endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::ConsultationRecord;

#[derive(Serialize)]
pub struct HistoryResponse {
    pub records: Vec<ConsultationRecord>,
}

/// `GET /api/history`: newest first.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<HistoryResponse>, ApiError> {
    Ok(Json(HistoryResponse {
        records: ctx.engine.history()?,
    }))
}
