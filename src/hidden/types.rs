//! Hidden message data model.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::error::{HiddenError, Result};
use crate::geo::Coordinate;

/// The single active secret.
///
/// `text` and `anchor` are fixed at creation. Only the guess log changes:
/// it is append-only, kept in chronological order, may hold duplicates, and
/// can be emptied as a whole.
///
/// The secret text is wiped from memory on drop and never shown by `Debug`.
///
/// # Example
///
/// ```
/// use hideaway_core::geo::Coordinate;
/// use hideaway_core::hidden::HiddenMessage;
///
/// let anchor = Coordinate::new(44.8113, -91.4985).unwrap();
/// let message = HiddenMessage::new("under the bridge", anchor).unwrap();
///
/// assert_eq!(message.text(), "under the bridge");
/// assert!(message.guesses().is_empty());
/// assert!(!format!("{message:?}").contains("bridge"));
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHiddenMessage")]
pub struct HiddenMessage {
    text: String,

    #[serde(rename = "location")]
    anchor: Coordinate,

    guesses: Vec<Coordinate>,
}

impl HiddenMessage {
    /// Creates a message with an empty guess log.
    ///
    /// # Errors
    ///
    /// Returns [`HiddenError::Validation`] if `text` is empty or only
    /// whitespace.
    pub fn new(text: impl Into<String>, anchor: Coordinate) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(HiddenError::Validation(
                "Message text must not be empty".to_string(),
            ));
        }
        Ok(Self {
            text,
            anchor,
            guesses: Vec::new(),
        })
    }

    /// The secret content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the message was hidden.
    #[must_use]
    pub const fn anchor(&self) -> Coordinate {
        self.anchor
    }

    /// Every guess made so far, oldest first.
    #[must_use]
    pub fn guesses(&self) -> &[Coordinate] {
        &self.guesses
    }

    pub(crate) fn push_guess(&mut self, guess: Coordinate) {
        self.guesses.push(guess);
    }

    pub(crate) fn clear_guesses(&mut self) {
        self.guesses.clear();
    }
}

/// Wire shape before validation.
#[derive(Deserialize)]
struct RawHiddenMessage {
    #[serde(alias = "message")]
    text: String,
    #[serde(rename = "location", alias = "anchor")]
    anchor: Coordinate,
    guesses: Vec<Coordinate>,
}

impl TryFrom<RawHiddenMessage> for HiddenMessage {
    type Error = HiddenError;

    fn try_from(raw: RawHiddenMessage) -> Result<Self> {
        let mut message = Self::new(raw.text, raw.anchor)?;
        message.guesses = raw.guesses;
        Ok(message)
    }
}

impl std::fmt::Debug for HiddenMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiddenMessage")
            .field("text", &"<redacted>")
            .field("anchor", &self.anchor)
            .field("guesses", &self.guesses.len())
            .finish()
    }
}

impl Drop for HiddenMessage {
    fn drop(&mut self) {
        self.text.zeroize();
    }
}
