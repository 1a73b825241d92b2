//! HTTP router for the student app.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. A permissive CORS layer lets a browser
//! front end served from another origin talk to it.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::engine::CareEngine;

/// Build the API router around a shared engine.
pub fn api_router(engine: Arc<CareEngine>) -> Router {
    build_router(ApiContext::new(engine))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/symptoms", get(endpoints::symptoms::list))
        .route("/symptoms/toggle", post(endpoints::symptoms::toggle))
        .route("/state", get(endpoints::session::state))
        .route("/navigate", post(endpoints::session::navigate))
        .route("/session/reset", post(endpoints::session::reset))
        .route("/assessment/preview", post(endpoints::assessment::preview))
        .route("/assessment/complete", post(endpoints::assessment::complete))
        .route("/timeline/:duration", get(endpoints::guidance::timeline))
        .route("/guidance/:severity", get(endpoints::guidance::bundle))
        .route("/chat/send", post(endpoints::chat::send))
        .route("/chat/transcript", get(endpoints::chat::transcript))
        .route("/chat/quick-replies", get(endpoints::chat::quick_replies))
        .route("/history", get(endpoints::history::list))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
