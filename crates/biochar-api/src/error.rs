//! Error types for the estimator HTTP layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! Every response body has the same shape:
//!
//! ```json
//! { "error": "<fixed message>", "kind": "<machine tag>", "status": 400 }
//! ```
//!
//! Diagnostic detail is logged, never returned.

use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use biochar_core::EstimateError;
use tracing::{error, warn};

/// Errors that can occur in the estimator API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The caller's input was rejected by the estimator.
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    /// The JSON request body was missing, malformed, or of the wrong shape.
    #[error("json body rejected: {0}")]
    Json(#[from] JsonRejection),

    /// The request was not a readable `multipart/form-data` upload.
    #[error("multipart request rejected: {0}")]
    MultipartRequest(#[from] MultipartRejection),

    /// The multipart upload stream could not be read.
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable tag for this error.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Estimate(e) => e.kind(),
            Self::Json(_) | Self::MultipartRequest(_) | Self::Multipart(_) => "invalid_request",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message) = match &self {
            Self::Estimate(e) => {
                warn!(kind, detail = %e, "estimate rejected");
                (StatusCode::BAD_REQUEST, e.public_message().to_owned())
            }
            Self::Json(e) => {
                warn!(kind, detail = %e, "request body rejected");
                (
                    client_status(e.status()),
                    "Malformed request body.".to_owned(),
                )
            }
            Self::MultipartRequest(e) => {
                warn!(kind, detail = %e, "upload rejected");
                (
                    client_status(e.status()),
                    "Malformed multipart upload.".to_owned(),
                )
            }
            Self::Multipart(e) => {
                warn!(kind, detail = %e, "upload rejected");
                (
                    client_status(e.status()),
                    "Malformed multipart upload.".to_owned(),
                )
            }
            Self::Internal(detail) => {
                error!(kind, detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_owned(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "kind": kind,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Collapse extractor statuses to 400, keeping 413 for oversized bodies.
fn client_status(status: StatusCode) -> StatusCode {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        status
    } else {
        StatusCode::BAD_REQUEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extractor_statuses_collapse_to_bad_request() {
        assert_eq!(
            client_status(StatusCode::UNPROCESSABLE_ENTITY),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            client_status(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            client_status(StatusCode::PAYLOAD_TOO_LARGE),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn estimate_errors_keep_their_kind() {
        let err = ApiError::from(EstimateError::InvalidArea("nan".to_owned()));
        assert_eq!(err.kind(), "invalid_area");
        assert_eq!(ApiError::Internal("x".to_owned()).kind(), "internal");
    }
}
