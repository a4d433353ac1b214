//! One-shot position acquisition.
//!
//! The core never talks to GPS hardware. An embedding application provides
//! a [`PositioningSource`]; the core asks it for exactly one coordinate per
//! unlock attempt and stops listening as soon as that coordinate arrives.
//!
//! # Single Resolution
//!
//! - [`PositionReply::resolve`] consumes the reply, so a source cannot
//!   deliver twice for one request
//! - Once the requester has its value, or gives up after the timeout, the
//!   reply reports [`is_cancelled`](PositionReply::is_cancelled) and the
//!   source should unregister its listener
//! - [`first_fix`] turns a continuous update stream into a single value and
//!   closes the stream behind it
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use hideaway_core::geo::Coordinate;
//! use hideaway_core::positioning::{request_position, PositionReply, PositioningSource};
//!
//! struct FixedSource(Coordinate);
//!
//! impl PositioningSource for FixedSource {
//!     fn request_one_shot(&self, reply: PositionReply) {
//!         reply.resolve(self.0);
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let here = Coordinate::new(44.8113, -91.4985).unwrap();
//! let position = request_position(&FixedSource(here), Duration::from_secs(1))
//!     .await
//!     .unwrap();
//! assert_eq!(position, here);
//! # });
//! ```

mod error;
mod request;

pub use error::PositioningError;
pub use request::{first_fix, request_position, PositionReply, PositioningSource};
