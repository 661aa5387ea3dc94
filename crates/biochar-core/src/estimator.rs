//! Request orchestration for the three area sources.
//!
//! [`Estimator`] owns the read-only catalog and resolution table and exposes
//! one entry point per area source. Each entry point resolves the area first
//! and the feedstock second, so area problems (bad geometry, unknown image
//! source, undecodable image) are reported even when the feedstock is also
//! wrong. An unknown image source is always rejected before the decoder is
//! invoked.
//!
//! The estimator holds no mutable state and is safe to share across threads.

use tracing::debug;

use crate::error::EstimateError;
use crate::estimate::{EstimationResult, SQUARE_METERS_PER_HECTARE, estimate};
use crate::feedstock::FeedstockCatalog;
use crate::geodesy;
use crate::imagery::{DimensionDecoder, ResolutionTable, image_area_m2};

/// Stateless biochar estimator over injected lookup tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimator {
    catalog: FeedstockCatalog,
    resolutions: ResolutionTable,
}

impl Estimator {
    /// Create an estimator over the given tables.
    pub const fn new(catalog: FeedstockCatalog, resolutions: ResolutionTable) -> Self {
        Self {
            catalog,
            resolutions,
        }
    }

    /// The feedstock catalog in use.
    pub const fn catalog(&self) -> &FeedstockCatalog {
        &self.catalog
    }

    /// The image resolution table in use.
    pub const fn resolutions(&self) -> &ResolutionTable {
        &self.resolutions
    }

    /// Estimate from a land area given directly in hectares.
    pub fn from_hectares(
        &self,
        feedstock: &str,
        hectares: f64,
        pile_height: Option<f64>,
    ) -> Result<EstimationResult, EstimateError> {
        if !hectares.is_finite() || hectares < 0.0 {
            return Err(EstimateError::InvalidArea(format!(
                "hectares must be finite and >= 0, got {hectares}"
            )));
        }
        let area_m2 = hectares * SQUARE_METERS_PER_HECTARE;
        self.finish(feedstock, area_m2, pile_height)
    }

    /// Estimate from multi-line `lat, lon` polygon text.
    pub fn from_polygon(
        &self,
        feedstock: &str,
        coordinates: &str,
        pile_height: Option<f64>,
    ) -> Result<EstimationResult, EstimateError> {
        let area_m2 = geodesy::polygon_area_m2(coordinates)?;
        debug!(area_m2, "polygon area computed");
        self.finish(feedstock, area_m2, pile_height)
    }

    /// Estimate from an uploaded image and its source tag.
    pub fn from_image(
        &self,
        feedstock: &str,
        image_source: &str,
        bytes: &[u8],
        decoder: &dyn DimensionDecoder,
        pile_height: Option<f64>,
    ) -> Result<EstimationResult, EstimateError> {
        let resolution = self.resolutions.resolution(image_source)?;
        let dimensions = decoder.dimensions(bytes)?;
        let area_m2 = image_area_m2(dimensions, resolution);
        debug!(
            width_px = dimensions.width_px,
            height_px = dimensions.height_px,
            resolution,
            area_m2,
            "image area computed"
        );
        self.finish(feedstock, area_m2, pile_height)
    }

    fn finish(
        &self,
        feedstock: &str,
        area_m2: f64,
        pile_height: Option<f64>,
    ) -> Result<EstimationResult, EstimateError> {
        if !area_m2.is_finite() {
            return Err(EstimateError::InvalidArea(format!(
                "area of {area_m2} m^2 is not representable"
            )));
        }
        let feedstock = self.catalog.lookup(feedstock)?;
        let result = estimate(feedstock, area_m2, pile_height);
        if !result.is_finite() {
            return Err(EstimateError::InvalidArea(format!(
                "estimate for {area_m2} m^2 overflowed"
            )));
        }
        Ok(result)
    }
}
