//! Yield calculation: from a land area to biomass, biochar, and dosing rate.
//!
//! The model assumes only [`COVERAGE_FRACTION`] of the land is covered by
//! biomass piles of a uniform height. Pile volume times bulk density gives
//! the biomass mass; the feedstock's yield factor gives the biochar mass;
//! spreading that biochar back over the whole area gives the application
//! rate.
//!
//! # Pile height
//!
//! An override is used only when it is a finite number greater than zero.
//! Absent, zero, and negative overrides all fall back to the feedstock's
//! default height, so a caller cannot request a pile height of exactly zero.

use serde::Serialize;

use crate::feedstock::Feedstock;
use crate::rounding::round_half_even;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fraction of the land area assumed to be covered by biomass piles.
pub const COVERAGE_FRACTION: f64 = 0.05;

/// Square meters in one hectare.
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Decimal places for reported quantities.
pub const REPORTED_DECIMALS: u32 = 2;

/// Decimal places for the pile area in hectares, which is usually tiny.
pub const PILE_HECTARE_DECIMALS: u32 = 4;

// ---------------------------------------------------------------------------
// EstimationResult
// ---------------------------------------------------------------------------

/// Full, rounded breakdown of one estimate.
///
/// `biochar_yield_kg <= biomass_mass_kg` always holds because every catalog
/// yield factor is at most 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationResult {
    /// Total land area in square meters.
    pub area_m2: f64,
    /// Total land area in hectares.
    pub area_hectares: f64,
    /// Area covered by piles in square meters.
    pub pile_area_m2: f64,
    /// Area covered by piles in hectares (4 decimal places).
    pub pile_area_hectares: f64,
    /// Pile volume in cubic meters.
    pub volume_m3: f64,
    /// Raw biomass mass in kilograms.
    pub biomass_mass_kg: f64,
    /// Biochar produced from the biomass, in kilograms.
    pub biochar_yield_kg: f64,
    /// Biochar per hectare of land. Zero when the area is zero.
    pub application_rate_kg_per_ha: f64,
}

impl EstimationResult {
    /// Whether every reported figure is a finite number.
    pub const fn is_finite(&self) -> bool {
        self.area_m2.is_finite()
            && self.area_hectares.is_finite()
            && self.pile_area_m2.is_finite()
            && self.pile_area_hectares.is_finite()
            && self.volume_m3.is_finite()
            && self.biomass_mass_kg.is_finite()
            && self.biochar_yield_kg.is_finite()
            && self.application_rate_kg_per_ha.is_finite()
    }
}

/// Resolve the pile height for a feedstock and an optional override.
pub fn effective_pile_height(feedstock: &Feedstock, override_m: Option<f64>) -> f64 {
    override_m
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(feedstock.default_pile_height_m)
}

/// Estimate biochar production for `area_m2` square meters of land.
///
/// `area_m2` must be finite and non-negative. Extreme areas or pile heights
/// can still overflow; check [`EstimationResult::is_finite`].
pub fn estimate(
    feedstock: &Feedstock,
    area_m2: f64,
    pile_height_override: Option<f64>,
) -> EstimationResult {
    let height_m = effective_pile_height(feedstock, pile_height_override);

    let area_ha = area_m2 / SQUARE_METERS_PER_HECTARE;
    let pile_area_m2 = area_m2 * COVERAGE_FRACTION;
    let volume_m3 = pile_area_m2 * height_m;
    let biomass_kg = volume_m3 * feedstock.density_kg_per_m3;
    let biochar_kg = biomass_kg * feedstock.yield_factor;
    let application_rate = if area_ha > 0.0 {
        biochar_kg / area_ha
    } else {
        0.0
    };

    EstimationResult {
        area_m2: round_half_even(area_m2, REPORTED_DECIMALS),
        area_hectares: round_half_even(area_ha, REPORTED_DECIMALS),
        pile_area_m2: round_half_even(pile_area_m2, REPORTED_DECIMALS),
        pile_area_hectares: round_half_even(
            pile_area_m2 / SQUARE_METERS_PER_HECTARE,
            PILE_HECTARE_DECIMALS,
        ),
        volume_m3: round_half_even(volume_m3, REPORTED_DECIMALS),
        biomass_mass_kg: round_half_even(biomass_kg, REPORTED_DECIMALS),
        biochar_yield_kg: round_half_even(biochar_kg, REPORTED_DECIMALS),
        application_rate_kg_per_ha: round_half_even(application_rate, REPORTED_DECIMALS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedstock::FeedstockCatalog;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn feedstock(name: &str) -> Feedstock {
        FeedstockCatalog::standard()
            .lookup(name)
            .cloned()
            .unwrap_or_else(|_| Feedstock::new(name, 1.0, 1.0, 1.0))
    }

    #[test]
    fn wood_chips_one_hectare() {
        let result = estimate(&feedstock("Wood chips"), 10_000.0, None);
        assert_close(result.area_m2, 10_000.0);
        assert_close(result.area_hectares, 1.0);
        assert_close(result.pile_area_m2, 500.0);
        assert_close(result.pile_area_hectares, 0.05);
        assert_close(result.volume_m3, 150.0);
        assert_close(result.biomass_mass_kg, 31_200.0);
        assert_close(result.biochar_yield_kg, 9_360.0);
        assert_close(result.application_rate_kg_per_ha, 9_360.0);
    }

    #[test]
    fn sludge_zero_area_is_all_zero() {
        let result = estimate(&feedstock("Sludge"), 0.0, None);
        assert_close(result.area_m2, 0.0);
        assert_close(result.volume_m3, 0.0);
        assert_close(result.biomass_mass_kg, 0.0);
        assert_close(result.biochar_yield_kg, 0.0);
        assert_close(result.application_rate_kg_per_ha, 0.0);
        assert!(result.application_rate_kg_per_ha.is_finite());
    }

    #[test]
    fn explicit_height_overrides_default() {
        let result = estimate(&feedstock("Wood chips"), 10_000.0, Some(1.0));
        assert_close(result.volume_m3, 500.0);
        assert_close(result.biomass_mass_kg, 104_000.0);
    }

    #[test]
    fn zero_or_negative_height_falls_back_to_default() {
        let wood = feedstock("Wood chips");
        assert_close(effective_pile_height(&wood, Some(0.0)), 0.3);
        assert_close(effective_pile_height(&wood, Some(-2.0)), 0.3);
        assert_close(effective_pile_height(&wood, Some(f64::NAN)), 0.3);
        assert_close(effective_pile_height(&wood, None), 0.3);
        assert_close(effective_pile_height(&wood, Some(0.5)), 0.5);
    }

    #[test]
    fn application_rate_is_independent_of_area() {
        let rice = feedstock("Rice husk");
        let small = estimate(&rice, 2_500.0, None);
        let large = estimate(&rice, 250_000.0, None);
        // 0.05 * 0.2 m * 96 kg/m3 * 0.25 * 10_000 m2/ha
        assert_close(small.application_rate_kg_per_ha, 2_400.0);
        assert_close(large.application_rate_kg_per_ha, 2_400.0);
    }

    #[test]
    fn biochar_never_exceeds_biomass() {
        for f in FeedstockCatalog::standard().entries() {
            for area in [0.0, 0.5, 1.0, 123.456, 10_000.0, 7_654_321.0] {
                let result = estimate(f, area, None);
                assert!(
                    result.biochar_yield_kg <= result.biomass_mass_kg,
                    "{} at {area} m2",
                    f.name
                );
            }
        }
    }

    #[test]
    fn pile_hectares_keep_four_decimals() {
        let result = estimate(&feedstock("Bamboo"), 1_234.0, None);
        // 1234 * 0.05 / 10_000 = 0.00617
        assert_close(result.pile_area_hectares, 0.0062);
        assert_close(result.area_hectares, 0.12);
    }
}
