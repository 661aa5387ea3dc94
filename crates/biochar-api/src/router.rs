//! Axum router construction for the estimator API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the estimator server.
///
/// The router includes:
/// - `GET /health` -- liveness probe
/// - `GET /feedstocks` -- feedstock catalog
/// - `GET /image-sources` -- image source resolutions
/// - `POST /estimate/direct` -- estimate from hectares
/// - `POST /estimate/polygon` -- estimate from a coordinate polygon
/// - `POST /estimate/image` -- estimate from an uploaded image
/// - `POST /estimate/jpeg` -- alias of `/estimate/image`
///
/// Request bodies are capped at `state.max_upload_bytes`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/feedstocks", get(handlers::list_feedstocks))
        .route("/image-sources", get(handlers::list_image_sources))
        .route("/estimate/direct", post(handlers::estimate_direct))
        .route("/estimate/polygon", post(handlers::estimate_polygon))
        .route("/estimate/image", post(handlers::estimate_image))
        .route("/estimate/jpeg", post(handlers::estimate_image))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
