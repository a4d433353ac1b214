//! Owner of the single active hidden message.

// Mutations persist while holding the lock so memory and disk cannot
// interleave across callers.
#![allow(clippy::significant_drop_tightening)]

use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};
use zeroize::Zeroize;

use super::error::{HiddenError, Result};
use super::storage::PersistenceBackend;
use super::types::HiddenMessage;
use crate::geo::Coordinate;

/// Store for the zero-or-one active [`HiddenMessage`].
///
/// Every mutation and `save`/`load` runs under one store-wide lock, so the
/// store can be shared between a foreground caller and background saves.
/// Mutations are persisted immediately. If persisting fails the in-memory
/// change is kept, the store is marked unsaved, and the error returned; the
/// next successful [`save`](Self::save) writes it out, or removes the record
/// when the failed change was a [`clear_message`](Self::clear_message).
///
/// # Example
///
/// ```
/// use hideaway_core::geo::Coordinate;
/// use hideaway_core::hidden::{FileBackend, HiddenMessageStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = HiddenMessageStore::new(FileBackend::in_dir(dir.path()));
///
/// let anchor = Coordinate::new(44.8113, -91.4985).unwrap();
/// store.hide("under the bridge", anchor).unwrap();
///
/// // Simulate a restart
/// let restarted = HiddenMessageStore::new(FileBackend::in_dir(dir.path()));
/// assert!(restarted.load().unwrap());
/// assert_eq!(restarted.current().unwrap().unwrap().text(), "under the bridge");
/// ```
#[derive(Debug)]
pub struct HiddenMessageStore {
    backend: Box<dyn PersistenceBackend>,
    state: Mutex<StoreState>,
}

/// Everything guarded by the store lock.
#[derive(Debug, Default)]
struct StoreState {
    message: Option<HiddenMessage>,
    /// Memory holds a change the backend has not accepted yet.
    dirty: bool,
}

impl HiddenMessageStore {
    /// Creates an empty store. Call [`load`](Self::load) to restore
    /// persisted state.
    pub fn new(backend: impl PersistenceBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            state: Mutex::new(StoreState::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|e| HiddenError::Storage(format!("Failed to acquire store lock: {e}")))
    }

    /// Replaces any existing message with a new one and persists it.
    ///
    /// The previous message and its guesses are discarded outright.
    ///
    /// # Errors
    ///
    /// Returns [`HiddenError::Validation`] for empty text (state untouched),
    /// or a persistence error if the new message could not be written.
    pub fn hide(&self, text: &str, anchor: Coordinate) -> Result<()> {
        let message = HiddenMessage::new(text, anchor)?;
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let replaced = state.message.is_some();
        let message = state.message.insert(message);
        debug!("Hid new message (replaced previous: {replaced})");
        self.persist(message, &mut state.dirty)
    }

    /// Returns a snapshot of the active message, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn current(&self) -> Result<Option<HiddenMessage>> {
        Ok(self.lock()?.message.clone())
    }

    /// Whether a message is currently hidden.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn is_active(&self) -> Result<bool> {
        Ok(self.lock()?.message.is_some())
    }

    /// Appends a guess to the active message and persists.
    ///
    /// Does nothing when no message is active.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the updated log could not be written.
    pub fn record_guess(&self, guess: Coordinate) -> Result<()> {
        if self.update(|message| message.push_guess(guess))?.is_none() {
            debug!("Ignored guess: no active message");
        }
        Ok(())
    }

    /// Empties the guess log of the active message and persists.
    ///
    /// Does nothing when no message is active.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the updated record could not be
    /// written.
    pub fn clear_guesses(&self) -> Result<()> {
        if self.update(HiddenMessage::clear_guesses)?.is_some() {
            debug!("Cleared guess log");
        }
        Ok(())
    }

    /// Discards the active message and removes the persisted copy.
    ///
    /// Idempotent. The in-memory message is dropped even if the backend
    /// fails to delete; the deletion is then retried by the next
    /// [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the persisted record could not be
    /// removed.
    pub fn clear_message(&self) -> Result<()> {
        let mut state = self.lock()?;
        if state.message.take().is_some() {
            info!("Cleared hidden message");
        }
        self.delete_record(&mut state.dirty)
    }

    /// Replaces in-memory state with the persisted record.
    ///
    /// If the store holds a change that failed to persist, memory is newer
    /// than the backend: nothing is read and the unsaved state is kept for
    /// the next [`save`](Self::save).
    ///
    /// # Returns
    ///
    /// `Ok(true)` if a message is active afterwards, `Ok(false)` if nothing
    /// was persisted (the store is left empty) or an unsaved clear is
    /// pending.
    ///
    /// # Errors
    ///
    /// Returns [`HiddenError::CorruptState`] if a record exists but cannot
    /// be parsed; in-memory state is left untouched in that case. Returns a
    /// persistence error if the backend cannot be read.
    pub fn load(&self) -> Result<bool> {
        let mut state = self.lock()?;
        if state.dirty {
            warn!("Skipped load: store has unsaved changes");
            return Ok(state.message.is_some());
        }
        let Some(mut bytes) = self.backend.read_all()? else {
            info!("No persisted hidden message");
            state.message = None;
            return Ok(false);
        };

        let parsed = parse_record(&bytes);
        bytes.zeroize();
        let message =
            parsed.inspect_err(|e| warn!("Persisted hidden message is unreadable: {e}"))?;

        info!(
            "Restored hidden message with {} guess(es)",
            message.guesses().len()
        );
        state.message = Some(message);
        Ok(true)
    }

    /// Writes the active message to the backend.
    ///
    /// With no active message, retries a deletion left pending by a failed
    /// [`clear_message`](Self::clear_message).
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the backend was updated (record written or pending
    /// deletion applied), `Ok(false)` if there was nothing to do.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write or deletion fails.
    pub fn save(&self) -> Result<bool> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        match state.message.as_ref() {
            Some(message) => self.persist(message, &mut state.dirty).map(|()| true),
            None if state.dirty => self.delete_record(&mut state.dirty).map(|()| true),
            None => Ok(false),
        }
    }

    /// Applies `f` to the active message under the lock, then persists.
    ///
    /// Returns `Ok(None)` without touching the backend when no message is
    /// active.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut HiddenMessage) -> R) -> Result<Option<R>> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let Some(message) = state.message.as_mut() else {
            return Ok(None);
        };
        let output = f(&mut *message);
        self.persist(message, &mut state.dirty)?;
        Ok(Some(output))
    }

    /// Reads the active message under the lock without cloning it.
    pub(crate) fn inspect<R>(&self, f: impl FnOnce(&HiddenMessage) -> R) -> Result<Option<R>> {
        let state = self.lock()?;
        Ok(state.message.as_ref().map(f))
    }

    fn persist(&self, message: &HiddenMessage, dirty: &mut bool) -> Result<()> {
        let mut bytes = serde_json::to_vec(message).map_err(|e| {
            *dirty = true;
            HiddenError::Storage(format!("Failed to serialize hidden message: {e}"))
        })?;
        let result = self.backend.write_all(&bytes);
        bytes.zeroize();
        *dirty = result.is_err();
        result.inspect_err(|e| warn!("Failed to persist hidden message: {e}"))
    }

    fn delete_record(&self, dirty: &mut bool) -> Result<()> {
        let result = self.backend.delete();
        *dirty = result.is_err();
        result.inspect_err(|e| warn!("Failed to delete persisted hidden message: {e}"))
    }
}

fn parse_record(bytes: &[u8]) -> Result<HiddenMessage> {
    serde_json::from_slice(bytes).map_err(|e| HiddenError::CorruptState(e.to_string()))
}
