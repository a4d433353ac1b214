//! Coordinate value type.

use serde::{Deserialize, Serialize};

use super::error::GeoError;

/// A validated geographic coordinate in decimal degrees.
///
/// Latitude is always within -90.0..=90.0 and longitude within
/// -180.0..=180.0, and neither is NaN or infinite. The range check runs on
/// construction and on deserialization, so every `Coordinate` in memory is
/// valid.
///
/// Serializes as `{"lat": <f64>, "lng": <f64>}`. The `latitude`/`longitude`
/// field names written by older builds are accepted when reading.
///
/// # Example
///
/// ```
/// use hideaway_core::geo::Coordinate;
///
/// let c = Coordinate::new(37.7749, -122.4194).unwrap();
/// assert_eq!(c.lat(), 37.7749);
/// assert_eq!(c.lng(), -122.4194);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Creates a coordinate after checking both components.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidLatitude`] or [`GeoError::InvalidLongitude`]
    /// if a component is not finite or out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Wire shape before validation.
#[derive(Deserialize)]
struct RawCoordinate {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}
