//! REST API endpoint handlers for the estimator server.
//!
//! Handlers are thin: they extract the request, call the matching
//! [`Estimator`](biochar_core::Estimator) entry point, and render the
//! result in the configured shape.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/feedstocks` | Feedstock catalog |
//! | `GET` | `/image-sources` | Image source resolutions |
//! | `POST` | `/estimate/direct` | Estimate from hectares |
//! | `POST` | `/estimate/polygon` | Estimate from `lat,lon` polygon text |
//! | `POST` | `/estimate/image` | Estimate from an uploaded image (multipart) |

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{FromRequest, Multipart, State};
use axum::response::IntoResponse;
use biochar_core::{EstimateResponse, Feedstock, ImageSource};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// JSON body extractor whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Request body for `POST /estimate/direct`.
#[derive(Debug, serde::Deserialize)]
pub struct DirectAreaRequest {
    /// Feedstock catalog name.
    pub feedstock_type: String,
    /// Land area in hectares.
    pub hectares: f64,
    /// Optional pile height in meters; zero or absent uses the default.
    #[serde(default)]
    pub pile_height: Option<f64>,
}

/// Request body for `POST /estimate/polygon`.
#[derive(Debug, serde::Deserialize)]
pub struct PolygonRequest {
    /// Feedstock catalog name.
    pub feedstock_type: String,
    /// One `lat,lon` pair per line.
    pub coordinates: String,
    /// Optional pile height in meters; zero or absent uses the default.
    #[serde(default)]
    pub pile_height: Option<f64>,
}

/// Fields collected from a multipart image upload.
#[derive(Debug, Default)]
struct ImageUpload {
    feedstock_type: String,
    image_source: String,
    pile_height: Option<f64>,
    file: Vec<u8>,
}

impl ImageUpload {
    /// Drain the multipart stream. Unknown fields are ignored; missing ones
    /// stay empty and are rejected later by the estimator.
    async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut upload = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                "feedstock_type" => upload.feedstock_type = field.text().await?,
                "image_source" => upload.image_source = field.text().await?,
                "pile_height" => upload.pile_height = field.text().await?.trim().parse().ok(),
                "file" => upload.file = field.bytes().await?.to_vec(),
                other => debug!(field = other, "ignoring unknown upload field"),
            }
        }
        Ok(upload)
    }
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// GET /feedstocks, GET /image-sources
// ---------------------------------------------------------------------------

/// List the feedstock catalog in display order.
pub async fn list_feedstocks(State(state): State<Arc<AppState>>) -> Json<Vec<Feedstock>> {
    Json(state.estimator.catalog().entries().to_vec())
}

/// List the known image sources and their resolutions.
pub async fn list_image_sources(State(state): State<Arc<AppState>>) -> Json<Vec<ImageSource>> {
    Json(state.estimator.resolutions().sources().to_vec())
}

// ---------------------------------------------------------------------------
// POST /estimate/*
// ---------------------------------------------------------------------------

/// Estimate from a land area given in hectares.
pub async fn estimate_direct(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<DirectAreaRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let result =
        state
            .estimator
            .from_hectares(&req.feedstock_type, req.hectares, req.pile_height)?;
    debug!(
        feedstock = req.feedstock_type.as_str(),
        area_m2 = result.area_m2,
        biochar_kg = result.biochar_yield_kg,
        "direct estimate"
    );
    Ok(Json(state.render(&result)))
}

/// Estimate from a polygon of `lat,lon` coordinates.
pub async fn estimate_polygon(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<PolygonRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let result =
        state
            .estimator
            .from_polygon(&req.feedstock_type, &req.coordinates, req.pile_height)?;
    debug!(
        feedstock = req.feedstock_type.as_str(),
        area_m2 = result.area_m2,
        biochar_kg = result.biochar_yield_kg,
        "polygon estimate"
    );
    Ok(Json(state.render(&result)))
}

/// Estimate from an uploaded aerial or satellite image.
///
/// Expects `multipart/form-data` with fields `feedstock_type`,
/// `image_source`, optional `pile_height`, and `file`. The source tag is
/// validated before the image header is decoded.
pub async fn estimate_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let mut multipart = multipart?;
    let upload = ImageUpload::read(&mut multipart).await?;
    let file_bytes = upload.file.len();

    let worker_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        worker_state.estimator.from_image(
            &upload.feedstock_type,
            &upload.image_source,
            &upload.file,
            worker_state.decoder.as_ref(),
            upload.pile_height,
        )
    })
    .await
    .map_err(|e| ApiError::Internal(format!("image task failed: {e}")))??;

    debug!(
        file_bytes,
        area_m2 = result.area_m2,
        biochar_kg = result.biochar_yield_kg,
        "image estimate"
    );
    Ok(Json(state.render(&result)))
}
