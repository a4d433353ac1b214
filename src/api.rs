//! Top-level API for embedding applications.

use std::path::Path;
use std::sync::Arc;

use crate::hidden::{FileBackend, HiddenMessageStore, PersistenceBackend, Result};
use crate::positioning::PositioningSource;
use crate::settings::EngineSettings;
use crate::unlock::{UnlockEngine, UnlockResult};

/// Core interface for Hideaway functionality.
///
/// This struct is the composition root: it owns the store and hands the
/// engine a handle to it. Presentation code talks to [`engine`](Self::engine).
#[derive(Debug)]
pub struct HideawayCore {
    engine: UnlockEngine,
    settings: EngineSettings,
}

impl HideawayCore {
    /// Creates a core over `backend` without loading persisted state.
    ///
    /// Useful for recovery: after [`open`](Self::open) reports corrupt
    /// state, build a core with `new` and call
    /// [`UnlockEngine::clear_message`] to reset.
    ///
    /// # Examples
    ///
    /// ```
    /// use hideaway_core::hidden::FileBackend;
    /// use hideaway_core::settings::EngineSettings;
    /// use hideaway_core::HideawayCore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let core = HideawayCore::new(FileBackend::in_dir(dir.path()), EngineSettings::default());
    /// assert!(core.engine().current().unwrap().is_none());
    /// ```
    pub fn new(backend: impl PersistenceBackend + 'static, settings: EngineSettings) -> Self {
        let store = Arc::new(HiddenMessageStore::new(backend));
        Self {
            engine: UnlockEngine::new(store),
            settings,
        }
    }

    /// Opens the file-backed core in `data_dir` and restores any persisted
    /// message.
    ///
    /// # Errors
    ///
    /// Returns [`HiddenError::CorruptState`](crate::hidden::HiddenError::CorruptState)
    /// if the persisted record is unreadable, or an I/O error if it cannot
    /// be read at all.
    pub fn open(data_dir: &Path, settings: EngineSettings) -> Result<Self> {
        let backend = FileBackend::new(data_dir.join(&settings.state_file_name));
        let core = Self::new(backend, settings);
        core.engine.load()?;
        Ok(core)
    }

    /// The unlock engine.
    #[must_use]
    pub const fn engine(&self) -> &UnlockEngine {
        &self.engine
    }

    /// The settings this core was built with.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Attempts an unlock at the position reported by `source`, waiting at
    /// most the configured positioning timeout.
    ///
    /// # Errors
    ///
    /// See [`UnlockEngine::attempt_unlock_here`].
    pub async fn attempt_unlock_here<S>(&self, source: &S) -> Result<UnlockResult>
    where
        S: PositioningSource + ?Sized,
    {
        self.engine
            .attempt_unlock_here(source, self.settings.positioning_timeout())
            .await
    }
}
