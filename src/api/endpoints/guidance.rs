//! Guidance endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{CareTimeline, DurationLevel, GuidanceBundle, Severity};

/// `GET /api/guidance/:severity`
pub async fn bundle(
    State(ctx): State<ApiContext>,
    Path(severity): Path<String>,
) -> Result<Json<GuidanceBundle>, ApiError> {
    let severity: Severity = severity.parse()?;
    Ok(Json(ctx.engine.guidance(severity).clone()))
}

/// `GET /api/timeline/:duration`
pub async fn timeline(
    State(ctx): State<ApiContext>,
    Path(duration): Path<String>,
) -> Result<Json<CareTimeline>, ApiError> {
    let duration: DurationLevel = duration.parse()?;
    Ok(Json(ctx.engine.timeline(duration).clone()))
}
