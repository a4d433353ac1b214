//! Distance-based unlocking of the hidden message.
//!
//! [`UnlockEngine`] is the entry point a presentation layer talks to: it
//! hides messages, evaluates unlock attempts against the anchor, and exposes
//! the guess history with each guess's distance to the anchor.
//!
//! # Lifecycle
//!
//! ```text
//! [NoMessage] --hide_message_at(text, anchor)--> [Active, guesses=[]]
//! [Active]    --clear_message()----------------> [NoMessage]
//! [Active]    --attempt_unlock(c)--------------> [Active, guesses+=c]
//! [Active]    --clear_guesses()----------------> [Active, guesses=[]]
//! ```
//!
//! Every attempt is logged, whether or not it unlocks.

mod engine;
mod types;

pub use engine::{UnlockEngine, UNLOCK_THRESHOLD_METERS};
pub use types::{GuessRing, UnlockResult};
