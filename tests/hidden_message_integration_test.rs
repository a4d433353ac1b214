//! Integration tests for the hidden message lifecycle.
//!
//! These tests exercise the engine and store together against real files,
//! simulating application restarts by reopening the data directory:
//! - Hide / restore round trips
//! - Unlock attempts inside and outside the threshold
//! - Guess log clearing and message clearing
//! - Corrupt and legacy persisted records

// Guess rings for identical guesses are compared for bit-exact equality.
#![allow(clippy::float_cmp)]

mod helpers;

use std::sync::Arc;

use hideaway_core::hidden::{
    FileBackend, HiddenError, HiddenMessageStore, MemoryBackend, PersistenceBackend,
};
use hideaway_core::unlock::{UnlockEngine, UnlockResult, UNLOCK_THRESHOLD_METERS};
use helpers::{coord, open_core, restart_store};

// ==================== Hide & Restore ====================

#[test]
fn hide_survives_restart_with_empty_guesses() {
    let dir = tempfile::tempdir().unwrap();
    let store = HiddenMessageStore::new(FileBackend::in_dir(dir.path()));
    store.hide("meet at the oak", coord(44.8113, -91.4985)).unwrap();
    assert!(store.save().unwrap());

    let restarted = restart_store(dir.path());

    let message = restarted.current().unwrap().unwrap();
    assert_eq!(message.text(), "meet at the oak");
    assert_eq!(message.anchor(), coord(44.8113, -91.4985));
    assert!(message.guesses().is_empty());
}

#[test]
fn second_hide_discards_first_message_and_guesses() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());
    let engine = core.engine();
    engine.hide_message_at("first", coord(0.0, 0.0)).unwrap();
    engine.attempt_unlock(coord(3.0, 3.0)).unwrap();

    engine.hide_message_at("second", coord(1.0, 1.0)).unwrap();

    let current = engine.current().unwrap().unwrap();
    assert_eq!(current.text(), "second");
    assert!(current.guesses().is_empty());

    let restarted = restart_store(dir.path()).current().unwrap().unwrap();
    assert_eq!(restarted.text(), "second");
    assert!(restarted.guesses().is_empty());
}

#[test]
fn empty_text_is_rejected_and_nothing_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());

    let result = core.engine().hide_message_at("", coord(0.0, 0.0));

    assert!(matches!(result, Err(HiddenError::Validation(_))));
    assert!(!dir.path().join("hidden.json").exists());
}

// ==================== Unlock Attempts ====================

#[test]
fn nearby_attempt_unlocks_and_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());
    core.engine()
        .hide_message_at("secret", coord(0.0, 0.0))
        .unwrap();

    let result = core.engine().attempt_unlock(coord(0.0, 0.0001)).unwrap();

    assert_eq!(
        result,
        UnlockResult::Unlocked {
            text: "secret".to_string()
        }
    );
    assert_eq!(
        core.engine().current().unwrap().unwrap().guesses().len(),
        1
    );
}

#[test]
fn distant_attempt_is_too_far_and_still_logged() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());
    core.engine()
        .hide_message_at("secret", coord(0.0, 0.0))
        .unwrap();

    let result = core.engine().attempt_unlock(coord(10.0, 10.0)).unwrap();

    match result {
        UnlockResult::TooFar { distance_meters } => {
            assert!(distance_meters > UNLOCK_THRESHOLD_METERS);
        }
        UnlockResult::Unlocked { .. } => panic!("distant guess must not unlock"),
    }

    let restarted = restart_store(dir.path()).current().unwrap().unwrap();
    assert_eq!(restarted.guesses(), &[coord(10.0, 10.0)]);
}

#[test]
fn attempt_without_message_creates_no_state() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());

    let result = core.engine().attempt_unlock(coord(0.0, 0.0));

    assert!(matches!(result, Err(HiddenError::NoActiveMessage)));
    assert!(!dir.path().join("hidden.json").exists());
}

#[test]
fn guess_log_preserves_chronological_order_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());
    let engine = core.engine();
    engine.hide_message_at("secret", coord(0.0, 0.0)).unwrap();

    let attempts = [coord(5.0, 5.0), coord(1.0, 1.0), coord(5.0, 5.0)];
    for guess in attempts {
        engine.attempt_unlock(guess).unwrap();
    }

    let restarted = open_core(dir.path());
    let rings = restarted.engine().guess_rings().unwrap();
    let centers: Vec<_> = rings.iter().map(|ring| ring.center).collect();
    assert_eq!(centers, attempts);
    assert_eq!(rings[0].radius_meters, rings[2].radius_meters);
}

// ==================== Clearing ====================

#[test]
fn clear_guesses_after_two_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());
    let engine = core.engine();
    engine.hide_message_at("secret", coord(12.0, 34.0)).unwrap();
    engine.attempt_unlock(coord(0.0, 0.0)).unwrap();
    engine.attempt_unlock(coord(12.0, 34.0)).unwrap();

    engine.clear_guesses().unwrap();

    let current = engine.current().unwrap().unwrap();
    assert!(current.guesses().is_empty());
    assert_eq!(current.text(), "secret");
    assert_eq!(current.anchor(), coord(12.0, 34.0));

    let restarted = restart_store(dir.path()).current().unwrap().unwrap();
    assert!(restarted.guesses().is_empty());
}

#[test]
fn clear_message_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());
    core.engine()
        .hide_message_at("secret", coord(0.0, 0.0))
        .unwrap();

    core.engine().clear_message().unwrap();

    assert!(core.engine().current().unwrap().is_none());
    assert!(!core.engine().load().unwrap());
    assert!(core.engine().current().unwrap().is_none());
    assert!(restart_store(dir.path()).current().unwrap().is_none());
}

#[test]
fn clear_message_twice_is_fine() {
    let dir = tempfile::tempdir().unwrap();
    let core = open_core(dir.path());

    core.engine().clear_message().unwrap();
    core.engine().clear_message().unwrap();
}

// ==================== Persisted Records ====================

#[test]
fn corrupt_file_is_reported_not_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hidden.json");
    std::fs::write(&path, b"{\"text\": \"secret\", \"location\": ").unwrap();

    let store = HiddenMessageStore::new(FileBackend::in_dir(dir.path()));
    let result = store.load();

    assert!(matches!(result, Err(HiddenError::CorruptState(_))));
    assert!(path.exists(), "corrupt record must be left for the caller");
}

#[test]
fn corrupt_file_can_be_reset_by_caller() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("hidden.json"), b"garbage").unwrap();

    let store = HiddenMessageStore::new(FileBackend::in_dir(dir.path()));
    assert!(store.load().is_err());
    store.clear_message().unwrap();

    assert!(!restart_store(dir.path()).is_active().unwrap());
}

#[test]
fn legacy_record_is_restored_and_rewritten_in_current_shape() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = r#"{
        "message": "left by the old app",
        "location": {"latitude": 44.8113, "longitude": -91.4985},
        "guesses": [{"latitude": 44.0, "longitude": -91.0}]
    }"#;
    std::fs::write(dir.path().join("hidden.json"), legacy).unwrap();

    let store = restart_store(dir.path());
    let message = store.current().unwrap().unwrap();
    assert_eq!(message.text(), "left by the old app");
    assert_eq!(message.guesses().len(), 1);

    store.save().unwrap();
    let rewritten: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("hidden.json")).unwrap()).unwrap();
    assert_eq!(rewritten["text"], "left by the old app");
    assert_eq!(rewritten["location"]["lat"], 44.8113);
    assert!(rewritten.get("message").is_none());
}

#[test]
fn failed_write_is_retried_by_save() {
    let backend = Arc::new(MemoryBackend::new());
    let engine = UnlockEngine::new(Arc::new(HiddenMessageStore::new(Arc::clone(&backend))));
    engine.hide_message_at("secret", coord(0.0, 0.0)).unwrap();

    backend.set_fail_writes(true);
    assert!(matches!(
        engine.attempt_unlock(coord(1.0, 1.0)),
        Err(HiddenError::Io(_))
    ));

    backend.set_fail_writes(false);
    assert!(engine.save().unwrap());

    let bytes = backend.read_all().unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["guesses"].as_array().unwrap().len(), 1);
}

#[test]
fn failed_clear_is_retried_by_save() {
    let backend = Arc::new(MemoryBackend::new());
    let engine = UnlockEngine::new(Arc::new(HiddenMessageStore::new(Arc::clone(&backend))));
    engine.hide_message_at("secret", coord(0.0, 0.0)).unwrap();

    backend.set_fail_writes(true);
    assert!(matches!(engine.clear_message(), Err(HiddenError::Io(_))));
    assert!(!engine.load().unwrap(), "unsaved clear must not be undone");

    backend.set_fail_writes(false);
    assert!(engine.save().unwrap());

    assert!(backend.read_all().unwrap().is_none());
    let restarted = HiddenMessageStore::new(Arc::clone(&backend));
    assert!(!restarted.load().unwrap());
    assert!(matches!(
        UnlockEngine::new(Arc::new(restarted)).attempt_unlock(coord(0.0, 0.0)),
        Err(HiddenError::NoActiveMessage)
    ));
}

#[test]
fn store_is_shareable_across_threads() {
    let backend = Arc::new(MemoryBackend::new());
    let engine = UnlockEngine::new(Arc::new(HiddenMessageStore::new(Arc::clone(&backend))));
    engine.hide_message_at("secret", coord(0.0, 0.0)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    engine.attempt_unlock(coord(f64::from(i), 0.0)).unwrap();
                    engine.save().unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.current().unwrap().unwrap().guesses().len(), 80);

    let restarted = HiddenMessageStore::new(Arc::clone(&backend));
    restarted.load().unwrap();
    assert_eq!(restarted.current().unwrap().unwrap().guesses().len(), 80);
}
