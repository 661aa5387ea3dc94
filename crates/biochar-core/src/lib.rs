//! Biochar production estimates from a land area and a feedstock type.
//!
//! A land area can come from three sources: a hectare figure, a polygon of
//! WGS84 coordinates, or an aerial image of known ground resolution. Every
//! source is reduced to square meters and passed through the same yield
//! model.
//!
//! # Modules
//!
//! - [`config`] -- Typed YAML configuration with environment overrides.
//! - [`error`] -- [`EstimateError`], the caller-input error kinds.
//! - [`estimate`] -- The yield model: pile volume, biomass, biochar, and
//!   application rate.
//! - [`estimator`] -- [`Estimator`], one entry point per area source.
//! - [`feedstock`] -- The fixed feedstock catalog.
//! - [`geodesy`] -- Coordinate parsing and ellipsoidal polygon area.
//! - [`imagery`] -- Image source resolutions and pixel-to-area conversion.
//! - [`response`] -- Minimal and extended response shapes.
//! - [`rounding`] -- Half-to-even decimal rounding.

pub mod config;
pub mod error;
pub mod estimate;
pub mod estimator;
pub mod feedstock;
pub mod geodesy;
pub mod imagery;
pub mod response;
pub mod rounding;

// Re-export primary types at crate root.
pub use config::{ConfigError, EstimatorConfig};
pub use error::EstimateError;
pub use estimate::{COVERAGE_FRACTION, EstimationResult, estimate};
pub use estimator::Estimator;
pub use feedstock::{Feedstock, FeedstockCatalog};
pub use geodesy::GeoPoint;
pub use imagery::{DimensionDecoder, ImageDimensions, ImageSource, ResolutionTable};
pub use response::{EstimateResponse, MinimalResponse, ResponseShape};
