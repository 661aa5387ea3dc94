//! Feedstock catalog: material properties keyed by feedstock name.
//!
//! The catalog is built once at startup and shared read-only. Lookups are
//! exact, case-sensitive string matches.

use serde::Serialize;

use crate::error::EstimateError;

// ---------------------------------------------------------------------------
// Feedstock
// ---------------------------------------------------------------------------

/// Physical and process properties of one biomass material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedstock {
    /// Catalog key, e.g. `"Wood chips"`.
    pub name: String,
    /// Bulk density in kilograms per cubic meter.
    pub density_kg_per_m3: f64,
    /// Fraction of biomass mass converted to biochar (0, 1].
    pub yield_factor: f64,
    /// Pile height used when the caller does not supply one.
    pub default_pile_height_m: f64,
}

impl Feedstock {
    /// Build a feedstock record.
    pub fn new(
        name: &str,
        density_kg_per_m3: f64,
        yield_factor: f64,
        default_pile_height_m: f64,
    ) -> Self {
        Self {
            name: name.to_owned(),
            density_kg_per_m3,
            yield_factor,
            default_pile_height_m,
        }
    }
}

// ---------------------------------------------------------------------------
// FeedstockCatalog
// ---------------------------------------------------------------------------

/// Fixed table of known feedstocks, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedstockCatalog {
    entries: Vec<Feedstock>,
}

impl FeedstockCatalog {
    /// The eight standard feedstocks.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                Feedstock::new("Rice husk", 96.0, 0.25, 0.2),
                Feedstock::new("Wood chips", 208.0, 0.30, 0.3),
                Feedstock::new("Corn cobs", 190.0, 0.28, 0.25),
                Feedstock::new("Coconut shells", 220.0, 0.35, 0.3),
                Feedstock::new("Bamboo", 180.0, 0.33, 0.25),
                Feedstock::new("Sugarcane bagasse", 140.0, 0.22, 0.2),
                Feedstock::new("Groundnut shells", 130.0, 0.26, 0.2),
                Feedstock::new("Sludge", 110.0, 0.50, 0.15),
            ],
        }
    }

    /// Look up a feedstock by exact name.
    pub fn lookup(&self, name: &str) -> Result<&Feedstock, EstimateError> {
        self.entries
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| EstimateError::InvalidFeedstock(name.to_owned()))
    }

    /// All entries in display order.
    pub fn entries(&self) -> &[Feedstock] {
        &self.entries
    }

    /// Number of feedstocks in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FeedstockCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_eight_entries() {
        assert_eq!(FeedstockCatalog::standard().len(), 8);
    }

    #[test]
    fn lookup_wood_chips() {
        let catalog = FeedstockCatalog::standard();
        let wood = catalog.lookup("Wood chips");
        assert!(wood.is_ok_and(|f| (f.density_kg_per_m3 - 208.0).abs() < f64::EPSILON
            && (f.yield_factor - 0.30).abs() < f64::EPSILON
            && (f.default_pile_height_m - 0.3).abs() < f64::EPSILON));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = FeedstockCatalog::standard();
        assert_eq!(
            catalog.lookup("wood chips").err(),
            Some(EstimateError::InvalidFeedstock("wood chips".to_owned()))
        );
    }

    #[test]
    fn unknown_feedstock_rejected() {
        let catalog = FeedstockCatalog::standard();
        assert!(matches!(
            catalog.lookup("Pine needles"),
            Err(EstimateError::InvalidFeedstock(_))
        ));
    }

    #[test]
    fn all_entries_have_valid_properties() {
        for f in FeedstockCatalog::standard().entries() {
            assert!(f.density_kg_per_m3 > 0.0, "{}", f.name);
            assert!(f.yield_factor > 0.0 && f.yield_factor <= 1.0, "{}", f.name);
            assert!(f.default_pile_height_m > 0.0, "{}", f.name);
        }
    }
}
