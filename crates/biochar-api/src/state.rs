//! Shared application state for the estimator API server.
//!
//! [`AppState`] holds the read-only estimator tables, the image decoder, and
//! the configured response shape. Nothing in it is mutated after startup, so
//! handlers share it through an [`Arc`] without locking.

use std::sync::Arc;

use biochar_core::{
    DimensionDecoder, EstimateResponse, EstimationResult, Estimator, EstimatorConfig,
    ResponseShape,
};

use crate::decode::HeaderDecoder;

/// Default request body limit when no configuration is supplied (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10_485_760;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Estimator over the standard feedstock and resolution tables.
    pub estimator: Estimator,
    /// Decoder used to read uploaded image dimensions.
    pub decoder: Arc<dyn DimensionDecoder>,
    /// Which result fields are returned to callers.
    pub shape: ResponseShape,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create state with standard tables and the given response shape.
    pub fn new(shape: ResponseShape) -> Self {
        Self {
            estimator: Estimator::default(),
            decoder: Arc::new(HeaderDecoder),
            shape,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Create state from loaded configuration.
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self {
            max_upload_bytes: config.server.max_upload_bytes,
            ..Self::new(config.response.shape)
        }
    }

    /// Replace the image decoder.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn DimensionDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Render a result in the configured shape.
    pub fn render(&self, result: &EstimationResult) -> EstimateResponse {
        self.shape.render(result)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ResponseShape::default())
    }
}
