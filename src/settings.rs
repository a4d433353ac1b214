//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::hidden::DEFAULT_STATE_FILE;

/// Settings for a [`HideawayCore`](crate::HideawayCore) instance.
///
/// Missing fields take their defaults when deserializing, so partial JSON
/// is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// File name of the persisted record inside the data directory.
    pub state_file_name: String,

    /// How long an unlock attempt waits for a position fix, in seconds.
    pub positioning_timeout_secs: u64,
}

impl EngineSettings {
    /// The positioning timeout as a `Duration`, never shorter than one
    /// second.
    #[must_use]
    pub fn positioning_timeout(&self) -> Duration {
        Duration::from_secs(self.positioning_timeout_secs.max(1))
    }

    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong
    /// type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes these settings to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (extremely rare).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            state_file_name: DEFAULT_STATE_FILE.to_string(),
            positioning_timeout_secs: 30,
        }
    }
}
