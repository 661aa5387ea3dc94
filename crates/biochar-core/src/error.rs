//! Error types for the `biochar-core` crate.
//!
//! Every estimation either succeeds with a complete result or fails with
//! exactly one [`EstimateError`]. All variants describe problems with the
//! caller's input; none of them indicate a fault in the service.
//!
//! The [`Display`](std::fmt::Display) output carries internal diagnostic
//! detail meant for logs. Callers outside the process should only ever see
//! [`EstimateError::kind`] and [`EstimateError::public_message`].

/// Errors that can occur while estimating biochar production.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    /// The feedstock name is not present in the catalog.
    #[error("unknown feedstock: {0:?}")]
    InvalidFeedstock(String),

    /// The coordinate text could not be turned into a polygon ring.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The uploaded bytes could not be decoded as an image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The image source tag does not name a known resolution.
    #[error("unknown image source: {0:?}")]
    InvalidImageSource(String),

    /// A directly supplied area is negative or not a finite number.
    #[error("invalid area: {0}")]
    InvalidArea(String),
}

impl EstimateError {
    /// Stable machine-readable tag for this error kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidFeedstock(_) => "invalid_feedstock",
            Self::InvalidGeometry(_) => "invalid_geometry",
            Self::InvalidImage(_) => "invalid_image",
            Self::InvalidImageSource(_) => "invalid_image_source",
            Self::InvalidArea(_) => "invalid_area",
        }
    }

    /// Fixed user-facing message for this error kind.
    ///
    /// Never includes the diagnostic detail carried by the variant.
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidFeedstock(_) => "Unknown feedstock type.",
            Self::InvalidGeometry(_) => {
                "Invalid coordinate format. Provide at least 3 'lat,lon' points, one per line."
            }
            Self::InvalidImage(_) => "Invalid image. Upload a readable JPEG, PNG, TIFF or WebP file.",
            Self::InvalidImageSource(_) => {
                "Unknown image source. Use one of: Satellite, Low Drone, High Drone."
            }
            Self::InvalidArea(_) => "Area must be a finite, non-negative number of hectares.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let errors = [
            EstimateError::InvalidFeedstock(String::new()),
            EstimateError::InvalidGeometry(String::new()),
            EstimateError::InvalidImage(String::new()),
            EstimateError::InvalidImageSource(String::new()),
            EstimateError::InvalidArea(String::new()),
        ];
        let kinds: std::collections::BTreeSet<&str> = errors.iter().map(EstimateError::kind).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn public_message_hides_detail() {
        let err = EstimateError::InvalidGeometry("line 2: could not parse \"abc\"".to_owned());
        assert!(!err.public_message().contains("abc"));
        assert!(err.to_string().contains("abc"));
    }
}
