//! HTTP API server for the biochar estimator.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Estimate endpoints** for the three area sources (hectares, a
//!   coordinate polygon, an uploaded image)
//! - **Catalog endpoints** listing feedstocks and image sources
//! - **Health probe** returning a fixed `ok`
//!
//! # Architecture
//!
//! All state is read-only after startup. Handlers delegate to
//! [`biochar_core::Estimator`]; image headers are read by
//! [`decode::HeaderDecoder`] on a blocking worker. Input problems are
//! returned as 400 responses with a stable `kind` tag (see [`error`]).

pub mod decode;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
