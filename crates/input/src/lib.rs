//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`]. Discrete
//! per-keypress handling only: every press is one action, matching the
//! one-step-per-event movement model of the engine.

pub mod map;

pub use block_drop_types as types;

pub use map::{handle_key_event, should_quit};
