//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameEvent`] commands and
//! turns them into the press/release edges the game controller expects,
//! including on terminals without key-release events.

pub mod map;
pub mod tracker;

pub use stc_tetris_types as types;

pub use map::{map_key, should_quit};
pub use tracker::{KeyTracker, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
