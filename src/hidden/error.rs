//! Error types for hidden message operations.
//!
//! Covers text validation, missing-message signalling, corrupt persisted
//! state, and backend I/O failures.

use thiserror::Error;

use crate::geo::GeoError;
use crate::positioning::PositioningError;

/// Error type for hidden message operations.
#[derive(Error, Debug)]
pub enum HiddenError {
    /// Caller supplied invalid message text.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation requires an active hidden message.
    #[error("No active hidden message")]
    NoActiveMessage,

    /// Persisted bytes exist but do not parse into a hidden message record.
    #[error("Corrupt persisted state: {0}")]
    CorruptState(String),

    /// Persistence backend failed to read, write, or delete.
    #[error("Persistence I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store bookkeeping failed (lock poisoning, serialization).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Coordinate outside the valid range.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(#[from] GeoError),

    /// Position could not be acquired for an unlock attempt.
    #[error("Positioning failed: {0}")]
    Positioning(#[from] PositioningError),
}

/// Result type alias for hidden message operations.
pub type Result<T> = std::result::Result<T, HiddenError>;
