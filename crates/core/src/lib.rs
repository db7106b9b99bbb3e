//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the controller state machine. It has
//! **zero dependencies** on terminals or I/O; everything host-specific goes
//! through the [`Platform`] trait.
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid with collision queries, locking and row clearing
//! - [`tetromino`]: spawn shapes, rotation and wall kick
//! - [`scoring`]: points, bonuses and level progression
//! - [`config`]: run-time feature flags and timing
//! - [`platform`]: the host contract
//! - [`game`]: the controller driving one game per [`Game::update`] call
//! - [`snapshot`]: `Copy` frame data handed to renderers
//! - [`headless`]: scripted platform for tests and benchmarks
//! - [`rng`]: deterministic random sources
//!
//! # Game Rules
//!
//! - **Random pieces**: each new piece is `random() % 7`; no bag
//! - **Rotation**: plain 90 degree turns of the piece box, O never rotates
//! - **Wall kick**: a rotation crossing a side wall is pushed back inside
//! - **Ghost piece**: shows where the current piece will land
//! - **No lock delay**: a piece locks as soon as a one-row fall collides
//! - **Game over**: a lock attempt with the piece still in rows 0-1
//!
//! # Example
//!
//! ```
//! use stc_tetris_core::{Game, GameConfig, HeadlessPlatform};
//! use stc_tetris_core::types::GameEvent;
//!
//! let mut game = Game::new(HeadlessPlatform::new(12345), GameConfig::default());
//! game.initialize().unwrap();
//!
//! game.platform_mut().tap(GameEvent::Drop);
//! game.update();
//!
//! assert_eq!(game.stats().total_pieces, 1);
//! assert!(game.stats().score > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! - **Tick Rate**: the host calls `update` every 16ms or so
//! - **Gravity**: 1000ms per row at level 0, times 9/10 per level
//! - **Autoshift**: held moves repeat after 200ms, then every 40ms

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod headless;
pub mod platform;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tetromino;

pub use stc_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::GameError;
pub use game::{Game, GameState};
pub use headless::{HeadlessPlatform, Notifications};
pub use platform::{InputBuffer, Platform};
pub use rng::{ScriptedRandom, SimpleRng};
pub use scoring::Stats;
pub use snapshot::GameSnapshot;
pub use tetromino::{rotate_cells, spawn_shape, try_rotate, Tetromino};
