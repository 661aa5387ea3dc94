//! Image-to-area conversion.
//!
//! An aerial or satellite image covers `width_px × height_px` pixels, each
//! spanning a fixed ground distance chosen by the image source. Decoding the
//! raw bytes is delegated to a [`DimensionDecoder`] so this crate never
//! depends on an image codec.

use serde::Serialize;

use crate::error::EstimateError;

// ---------------------------------------------------------------------------
// Decoding seam
// ---------------------------------------------------------------------------

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width_px: u32,
    /// Height in pixels.
    pub height_px: u32,
}

/// Reads pixel dimensions from raw image bytes.
///
/// Implementations must report unreadable input as
/// [`EstimateError::InvalidImage`].
pub trait DimensionDecoder: Send + Sync {
    /// Decode `bytes` far enough to learn the image's width and height.
    fn dimensions(&self, bytes: &[u8]) -> Result<ImageDimensions, EstimateError>;
}

// ---------------------------------------------------------------------------
// Resolution table
// ---------------------------------------------------------------------------

/// A named image source and its ground resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSource {
    /// Caller-facing tag, e.g. `"Satellite"`.
    pub name: String,
    /// Ground distance covered by one pixel, in meters.
    pub resolution_m_per_px: f64,
}

/// Fixed table mapping image source tags to ground resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionTable {
    sources: Vec<ImageSource>,
}

impl ResolutionTable {
    /// The standard sources: `Satellite`, `Low Drone`, `High Drone`.
    pub fn standard() -> Self {
        let source = |name: &str, resolution_m_per_px| ImageSource {
            name: name.to_owned(),
            resolution_m_per_px,
        };
        Self {
            sources: vec![
                source("Satellite", 0.04),
                source("Low Drone", 0.06),
                source("High Drone", 0.02),
            ],
        }
    }

    /// Resolution in meters per pixel for the given tag (exact match).
    pub fn resolution(&self, tag: &str) -> Result<f64, EstimateError> {
        self.sources
            .iter()
            .find(|s| s.name == tag)
            .map(|s| s.resolution_m_per_px)
            .ok_or_else(|| EstimateError::InvalidImageSource(tag.to_owned()))
    }

    /// All sources in display order.
    pub fn sources(&self) -> &[ImageSource] {
        &self.sources
    }
}

impl Default for ResolutionTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Area
// ---------------------------------------------------------------------------

/// Ground area in square meters covered by an image.
pub fn image_area_m2(dimensions: ImageDimensions, resolution_m_per_px: f64) -> f64 {
    let width_m = f64::from(dimensions.width_px) * resolution_m_per_px;
    let height_m = f64::from(dimensions.height_px) * resolution_m_per_px;
    width_m * height_m
}
