//! Terminal host for the game.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders snapshots into a
//! simple framebuffer that is flushed to the terminal with crossterm.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot to framebuffer (pure, testable)
//! - [`renderer`]: raw mode, alternate screen and frame output
//! - [`platform`]: [`TerminalPlatform`], the `Platform` implementation

pub mod fb;
pub mod game_view;
pub mod platform;
pub mod renderer;

pub use stc_tetris_core as core;
pub use stc_tetris_input as input;
pub use stc_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Viewport};
pub use platform::TerminalPlatform;
pub use renderer::{encode_full_into, TerminalRenderer};
