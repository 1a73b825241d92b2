//! Symptom catalog and selection endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ToggleRequest, ToggleResponse};
use crate::models::SymptomCard;

#[derive(Serialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<SymptomCard>,
}

/// `GET /api/symptoms`: the full catalog in display order.
pub async fn list(State(ctx): State<ApiContext>) -> Json<SymptomsResponse> {
    Json(SymptomsResponse {
        symptoms: ctx.engine.symptoms().to_vec(),
    })
}

/// `POST /api/symptoms/toggle`: add or remove one symptom from the selection.
pub async fn toggle(
    State(ctx): State<ApiContext>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let selected = ctx.engine.toggle_symptom(req.id.trim())?;
    let state = ctx.engine.snapshot()?;
    Ok(Json(ToggleResponse {
        id: req.id.trim().to_string(),
        selected,
        state,
    }))
}
