//! Error types for position acquisition.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while waiting for a one-shot position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositioningError {
    /// No position arrived before the deadline.
    #[error("Position request timed out after {0:?}")]
    Timeout(Duration),

    /// The source dropped the request without delivering a position.
    #[error("Positioning source abandoned the request")]
    Abandoned,
}
