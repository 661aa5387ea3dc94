//! Geodesic polygon area on the WGS84 ellipsoid.
//!
//! Field boundaries arrive as free text, one `lat, lon` pair per line. The
//! text is parsed into a ring of [`GeoPoint`]s and the enclosed area is
//! computed with Karney's ellipsoidal algorithm (via [`geo::GeodesicArea`]).
//! The ring is implicitly closed; the first point does not need repeating.
//!
//! Winding order is discarded: clockwise and counter-clockwise rings yield
//! the same area. Self-intersecting rings are not rejected and the area
//! reported for them is whatever the line integral produces.

use geo::{Coord, GeodesicArea, LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::EstimateError;

/// Minimum number of vertices in a polygon ring.
pub const MIN_RING_POINTS: usize = 3;

// ---------------------------------------------------------------------------
// GeoPoint
// ---------------------------------------------------------------------------

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        Self { x: p.lon, y: p.lat }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Parse one non-blank coordinate line.
fn parse_line(line_no: usize, line: &str) -> Result<GeoPoint, EstimateError> {
    // A leading or trailing comma leaves an empty number token.
    if line.starts_with(',') || line.ends_with(',') {
        return Err(EstimateError::InvalidGeometry(format!(
            "line {line_no}: empty coordinate in {line:?}"
        )));
    }

    let tokens: Vec<&str> = line.split(is_separator).filter(|t| !t.is_empty()).collect();
    let [lat_str, lon_str] = tokens.as_slice() else {
        return Err(EstimateError::InvalidGeometry(format!(
            "line {line_no}: expected 2 numbers, found {} in {line:?}",
            tokens.len()
        )));
    };

    let parse = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                EstimateError::InvalidGeometry(format!("line {line_no}: not a number: {s:?}"))
            })
    };
    let lat = parse(*lat_str)?;
    let lon = parse(*lon_str)?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(EstimateError::InvalidGeometry(format!(
            "line {line_no}: latitude {lat} out of range"
        )));
    }

    Ok(GeoPoint::new(lat, lon))
}

/// Parse multi-line `lat, lon` text into a polygon ring.
///
/// Numbers may be separated by commas, whitespace, or any mix of the two.
/// Blank lines are skipped. Any malformed line rejects the whole input, as
/// does a ring with fewer than [`MIN_RING_POINTS`] points.
pub fn parse_ring(text: &str) -> Result<Vec<GeoPoint>, EstimateError> {
    let ring = text
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| parse_line(idx.saturating_add(1), line))
        .collect::<Result<Vec<_>, _>>()?;

    if ring.len() < MIN_RING_POINTS {
        return Err(EstimateError::InvalidGeometry(format!(
            "at least {MIN_RING_POINTS} points required, got {}",
            ring.len()
        )));
    }

    Ok(ring)
}

// ---------------------------------------------------------------------------
// Area
// ---------------------------------------------------------------------------

/// Signed geodesic area of a ring in square meters.
///
/// Counter-clockwise rings are positive, clockwise rings negative.
pub fn signed_ring_area_m2(ring: &[GeoPoint]) -> Result<f64, EstimateError> {
    if ring.len() < MIN_RING_POINTS {
        return Err(EstimateError::InvalidGeometry(format!(
            "at least {MIN_RING_POINTS} points required, got {}",
            ring.len()
        )));
    }

    let exterior: LineString<f64> = ring.iter().copied().map(Coord::<f64>::from).collect();
    let polygon = Polygon::new(exterior, vec![]);
    Ok(polygon.geodesic_area_signed())
}

/// Unsigned geodesic area of a ring in square meters.
///
/// A degenerate ring (collinear points) yields zero, not an error.
pub fn ring_area_m2(ring: &[GeoPoint]) -> Result<f64, EstimateError> {
    signed_ring_area_m2(ring).map(f64::abs)
}

/// Parse coordinate text and return the enclosed area in square meters.
pub fn polygon_area_m2(text: &str) -> Result<f64, EstimateError> {
    let ring = parse_ring(text)?;
    ring_area_m2(&ring)
}
