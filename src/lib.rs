//! Hideaway Core Library
//!
//! Core functionality for Hideaway - messages hidden at a place and revealed
//! only to someone who stands close enough to it.
//! This crate provides the hidden message state, the unlock engine, and the
//! persistence contract; maps, dialogs, and GPS hardware live in the
//! embedding application.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod geo;
pub mod hidden;
pub mod positioning;
pub mod settings;
pub mod unlock;

pub use api::HideawayCore;
