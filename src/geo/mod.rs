//! Geographic primitives for Hideaway.
//!
//! Provides the validated [`Coordinate`] value type and great-circle
//! distance on a spherical Earth.
//!
//! # Example Usage
//!
//! ```
//! use hideaway_core::geo::{distance_meters, Coordinate};
//!
//! let anchor = Coordinate::new(44.8113, -91.4985).unwrap();
//! let guess = Coordinate::new(44.8120, -91.4985).unwrap();
//!
//! let meters = distance_meters(anchor, guess);
//! assert!(meters > 70.0 && meters < 90.0);
//! ```

mod distance;
mod error;
mod types;

pub use distance::{distance_meters, EARTH_MEAN_RADIUS_METERS};
pub use error::GeoError;
pub use types::Coordinate;
