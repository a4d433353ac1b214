//! Unlock orchestration over the hidden message store.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use super::types::{GuessRing, UnlockResult};
use crate::geo::{distance_meters, Coordinate};
use crate::hidden::{HiddenError, HiddenMessage, HiddenMessageStore, Result};
use crate::positioning::{request_position, PositioningSource};

/// A guess strictly closer than this to the anchor unlocks the message.
pub const UNLOCK_THRESHOLD_METERS: f64 = 100.0;

/// Hides messages and evaluates unlock attempts.
///
/// The engine holds a shared handle to the store it was built with; the
/// store stays the only owner of the message itself.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use hideaway_core::geo::Coordinate;
/// use hideaway_core::hidden::{FileBackend, HiddenMessageStore};
/// use hideaway_core::unlock::{UnlockEngine, UnlockResult};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = Arc::new(HiddenMessageStore::new(FileBackend::in_dir(dir.path())));
/// let engine = UnlockEngine::new(store);
///
/// engine
///     .hide_message_at("secret", Coordinate::new(0.0, 0.0).unwrap())
///     .unwrap();
///
/// let near = Coordinate::new(0.0, 0.0001).unwrap();
/// let result = engine.attempt_unlock(near).unwrap();
/// assert_eq!(result, UnlockResult::Unlocked { text: "secret".to_string() });
/// ```
#[derive(Debug, Clone)]
pub struct UnlockEngine {
    store: Arc<HiddenMessageStore>,
}

impl UnlockEngine {
    /// Creates an engine over `store`.
    #[must_use]
    pub const fn new(store: Arc<HiddenMessageStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<HiddenMessageStore> {
        &self.store
    }

    /// Hides `text` at `anchor`, replacing any existing message.
    ///
    /// # Errors
    ///
    /// See [`HiddenMessageStore::hide`].
    pub fn hide_message_at(&self, text: &str, anchor: Coordinate) -> Result<()> {
        self.store.hide(text, anchor)
    }

    /// Logs `guess` and checks it against the anchor.
    ///
    /// The guess is recorded whatever the outcome. Recording and evaluation
    /// happen under a single store lock.
    ///
    /// # Errors
    ///
    /// Returns [`HiddenError::NoActiveMessage`] if nothing is hidden (the
    /// backend is not touched), or a persistence error if the updated guess
    /// log could not be written. In the latter case the guess stays recorded
    /// in memory.
    pub fn attempt_unlock(&self, guess: Coordinate) -> Result<UnlockResult> {
        let result = self
            .store
            .update(|message| {
                message.push_guess(guess);
                evaluate(message, guess)
            })?
            .ok_or(HiddenError::NoActiveMessage)?;

        debug!("Unlock attempt: unlocked={}", result.is_unlocked());
        Ok(result)
    }

    /// Acquires the current position from `source` and attempts an unlock
    /// there.
    ///
    /// Fails fast without requesting a position when nothing is hidden.
    ///
    /// # Errors
    ///
    /// Returns [`HiddenError::NoActiveMessage`], [`HiddenError::Positioning`]
    /// if no position arrives within `timeout`, or any error from
    /// [`attempt_unlock`](Self::attempt_unlock).
    pub async fn attempt_unlock_here<S>(&self, source: &S, timeout: Duration) -> Result<UnlockResult>
    where
        S: PositioningSource + ?Sized,
    {
        if !self.store.is_active()? {
            return Err(HiddenError::NoActiveMessage);
        }
        let position = request_position(source, timeout).await?;
        self.attempt_unlock(position)
    }

    /// Every logged guess, oldest first, with its distance to the anchor.
    ///
    /// Empty when nothing is hidden.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn guess_rings(&self) -> Result<Vec<GuessRing>> {
        let rings = self.store.inspect(|message| {
            let anchor = message.anchor();
            message
                .guesses()
                .iter()
                .map(|&center| GuessRing {
                    center,
                    radius_meters: distance_meters(center, anchor),
                })
                .collect()
        })?;
        Ok(rings.unwrap_or_default())
    }

    /// Discards the hidden message and its persisted copy.
    ///
    /// # Errors
    ///
    /// See [`HiddenMessageStore::clear_message`].
    pub fn clear_message(&self) -> Result<()> {
        self.store.clear_message()
    }

    /// Empties the guess log.
    ///
    /// # Errors
    ///
    /// See [`HiddenMessageStore::clear_guesses`].
    pub fn clear_guesses(&self) -> Result<()> {
        self.store.clear_guesses()
    }

    /// Snapshot of the active message.
    ///
    /// # Errors
    ///
    /// See [`HiddenMessageStore::current`].
    pub fn current(&self) -> Result<Option<HiddenMessage>> {
        self.store.current()
    }

    /// Restores persisted state.
    ///
    /// # Errors
    ///
    /// See [`HiddenMessageStore::load`].
    pub fn load(&self) -> Result<bool> {
        self.store.load()
    }

    /// Persists the active message.
    ///
    /// # Errors
    ///
    /// See [`HiddenMessageStore::save`].
    pub fn save(&self) -> Result<bool> {
        self.store.save()
    }
}

fn evaluate(message: &HiddenMessage, guess: Coordinate) -> UnlockResult {
    let distance = distance_meters(guess, message.anchor());
    if distance < UNLOCK_THRESHOLD_METERS {
        UnlockResult::Unlocked {
            text: message.text().to_owned(),
        }
    } else {
        UnlockResult::TooFar {
            distance_meters: distance,
        }
    }
}
