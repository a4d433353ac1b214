//! Hidden message state and persistence.
//!
//! This module owns the single active [`HiddenMessage`] and its guess log,
//! and persists it through a [`PersistenceBackend`].
//!
//! # Architecture
//!
//! ```text
//! HiddenMessageStore (store-wide lock)
//!     ├── Option<HiddenMessage>   (zero or one active message)
//!     └── PersistenceBackend      (whole-record read/write/delete)
//!             ├── FileBackend     (atomic temp-file + rename)
//!             └── MemoryBackend   (tests only)
//! ```
//!
//! # Persisted Format
//!
//! ```json
//! {
//!   "text": "meet me at the oak",
//!   "location": { "lat": 44.81, "lng": -91.49 },
//!   "guesses": [ { "lat": 44.80, "lng": -91.50 } ]
//! }
//! ```
//!
//! A missing record means "no active message". A record that exists but
//! cannot be parsed is reported as [`HiddenError::CorruptState`] rather than
//! being discarded.

mod error;
mod storage;
mod store;
mod types;

pub use error::{HiddenError, Result};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MemoryBackend;
pub use storage::{FileBackend, PersistenceBackend, DEFAULT_STATE_FILE};
pub use store::HiddenMessageStore;
pub use types::HiddenMessage;
