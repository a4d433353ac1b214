//! Error types for coordinate validation.

use thiserror::Error;

/// Errors raised when constructing a [`Coordinate`](super::Coordinate).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeoError {
    /// Latitude is not finite or lies outside -90.0..=90.0.
    #[error("Invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude is not finite or lies outside -180.0..=180.0.
    #[error("Invalid longitude: {0}")]
    InvalidLongitude(f64),
}
