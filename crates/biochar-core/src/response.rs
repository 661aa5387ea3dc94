//! Public response shapes.
//!
//! Deployments disagree on how much of the breakdown callers should see, so
//! the shape is a configuration choice: [`ResponseShape::Minimal`] exposes
//! only the three production figures, [`ResponseShape::Extended`] adds the
//! intermediate areas and volume.

use serde::{Deserialize, Serialize};

use crate::estimate::EstimationResult;

/// Which fields of an [`EstimationResult`] are returned to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// Biomass mass, biochar yield, and application rate only.
    Minimal,
    /// The full breakdown including areas and pile volume.
    #[default]
    Extended,
}

/// The three production figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinimalResponse {
    /// Raw biomass mass in kilograms.
    pub biomass_mass_kg: f64,
    /// Biochar produced, in kilograms.
    pub biochar_yield_kg: f64,
    /// Biochar per hectare of land.
    pub application_rate_kg_per_ha: f64,
}

impl From<&EstimationResult> for MinimalResponse {
    fn from(r: &EstimationResult) -> Self {
        Self {
            biomass_mass_kg: r.biomass_mass_kg,
            biochar_yield_kg: r.biochar_yield_kg,
            application_rate_kg_per_ha: r.application_rate_kg_per_ha,
        }
    }
}

/// An estimate rendered in the configured shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EstimateResponse {
    /// See [`ResponseShape::Minimal`].
    Minimal(MinimalResponse),
    /// See [`ResponseShape::Extended`].
    Extended(EstimationResult),
}

impl ResponseShape {
    /// Project a result onto this shape.
    pub fn render(self, result: &EstimationResult) -> EstimateResponse {
        match self {
            Self::Minimal => EstimateResponse::Minimal(MinimalResponse::from(result)),
            Self::Extended => EstimateResponse::Extended(*result),
        }
    }
}
