//! Session state and navigation endpoints.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, NavigateRequest};
use crate::controller::SessionSnapshot;

/// `GET /api/state`: current view, selection and last assessment.
pub async fn state(State(ctx): State<ApiContext>) -> Result<Json<SessionSnapshot>, ApiError> {
    Ok(Json(ctx.engine.snapshot()?))
}

/// `POST /api/navigate`: explicit, unconditional view change.
pub async fn navigate(
    State(ctx): State<ApiContext>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    ctx.engine.navigate(req.view)?;
    Ok(Json(ctx.engine.snapshot()?))
}

/// `POST /api/session/reset`: logout.
pub async fn reset(State(ctx): State<ApiContext>) -> Result<Json<SessionSnapshot>, ApiError> {
    ctx.engine.reset_session()?;
    Ok(Json(ctx.engine.snapshot()?))
}
