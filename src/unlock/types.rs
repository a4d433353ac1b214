//! Unlock outcome types.

use crate::geo::Coordinate;

/// Outcome of a single unlock attempt.
///
/// `Display` renders the user-facing line for the outcome without ever
/// including the secret text.
#[derive(Debug, Clone, PartialEq)]
pub enum UnlockResult {
    /// The guess was within the unlock threshold.
    Unlocked {
        /// The revealed secret.
        text: String,
    },
    /// The guess was too far from the anchor.
    TooFar {
        /// Great-circle distance from the guess to the anchor.
        distance_meters: f64,
    },
}

impl UnlockResult {
    /// Whether the attempt revealed the message.
    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked { .. })
    }

    /// The revealed text, if unlocked.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Unlocked { text } => Some(text),
            Self::TooFar { .. } => None,
        }
    }

    /// Distance to the anchor, if the attempt was too far.
    #[must_use]
    pub const fn distance_meters(&self) -> Option<f64> {
        match self {
            Self::Unlocked { .. } => None,
            Self::TooFar { distance_meters } => Some(*distance_meters),
        }
    }
}

impl std::fmt::Display for UnlockResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlocked { .. } => write!(f, "You unlocked a message!"),
            Self::TooFar { distance_meters } => write!(
                f,
                "You are {distance_meters:.1} m away from the hidden message."
            ),
        }
    }
}

/// A logged guess and how far it was from the anchor.
///
/// Drawn as a circle centred on the guess with the distance as its radius;
/// the anchor lies somewhere on that circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessRing {
    /// Where the guess was made.
    pub center: Coordinate,
    /// Distance from the guess to the anchor.
    pub radius_meters: f64,
}
