//! Great-circle distance.

use super::types::Coordinate;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_008.8;

/// Calculates the great-circle surface distance between two coordinates.
///
/// Uses the haversine formula on a sphere of [`EARTH_MEAN_RADIUS_METERS`].
/// The result is symmetric, non-negative, and zero for identical inputs.
///
/// # Example
///
/// ```
/// use hideaway_core::geo::{distance_meters, Coordinate};
///
/// let origin = Coordinate::new(0.0, 0.0).unwrap();
/// let nearby = Coordinate::new(0.0, 0.0001).unwrap();
///
/// let d = distance_meters(origin, nearby);
/// assert!((d - 11.12).abs() < 0.01);
/// ```
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h just past 1.0 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    EARTH_MEAN_RADIUS_METERS * c
}
