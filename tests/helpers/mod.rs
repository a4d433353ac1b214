//! Shared helpers for Hideaway integration tests.

#![allow(dead_code)]

use std::path::Path;

use hideaway_core::geo::Coordinate;
use hideaway_core::hidden::{FileBackend, HiddenMessageStore};
use hideaway_core::settings::EngineSettings;
use hideaway_core::HideawayCore;

/// Builds a coordinate, panicking on invalid input.
pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("test coordinate must be valid")
}

/// Opens a fresh file-backed store in `dir` and loads it, as on app start.
pub fn restart_store(dir: &Path) -> HiddenMessageStore {
    let store = HiddenMessageStore::new(FileBackend::in_dir(dir));
    store.load().expect("load should succeed");
    store
}

/// Opens a file-backed core in `dir` with default settings.
pub fn open_core(dir: &Path) -> HideawayCore {
    HideawayCore::open(dir, EngineSettings::default()).expect("core should open")
}
