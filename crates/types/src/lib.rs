//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data with no external dependencies, so they can be used
//! by the core state machine, the input mapping and any rendering host.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, row 0 is the spawn row)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INIT_DELAY_FALL` | 1000 | Gravity period at level 0 |
//! | `DAS_DELAY_TIMER` | 200 | Initial delay before a held direction repeats |
//! | `DAS_MOVE_TIMER` | 40 | Repeat interval of a held direction |
//! | `ROTATION_AUTOREPEAT_DELAY` | 375 | Initial delay before a held rotation repeats |
//! | `ROTATION_AUTOREPEAT_TIMER` | 200 | Repeat interval of a held rotation |
//!
//! # Examples
//!
//! ```
//! use stc_tetris_types::{Color, EventSet, GameEvent, TetrominoType, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = TetrominoType::from_index(9);
//! assert_eq!(kind, TetrominoType::T);
//! assert_eq!(kind.color(), Color::Purple);
//!
//! let mut events = EventSet::NONE;
//! events.insert(GameEvent::MoveLeft);
//! assert!(events.contains(GameEvent::MoveLeft));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Side of the square cell buffer every tetromino is stored in.
pub const TETROMINO_SIZE: usize = 4;

/// Number of tetromino types.
pub const TETROMINO_TYPES: usize = 7;

/// Initial gravity period (1000ms = 1 second per row)
pub const INIT_DELAY_FALL: u32 = 1000;

/// Score points given by filled rows (the original NES values times 10).
pub const SCORE_1_FILLED_ROW: u64 = 400;
pub const SCORE_2_FILLED_ROW: u64 = 1000;
pub const SCORE_3_FILLED_ROW: u64 = 3000;
pub const SCORE_4_FILLED_ROW: u64 = 12000;

/// Move-down bonus is `SCORE_2_FILLED_ROW * (level + 1)` divided by this.
pub const SCORE_MOVE_DOWN_DIVISOR: u64 = 1000;

/// Hard-drop bonus divisors. Playing without the shadow pays more.
pub const SCORE_DROP_DIVISOR: u64 = 20;
pub const SCORE_DROP_WITH_SHADOW_DIVISOR: u64 = 100;

/// Number of filled rows required per level.
pub const FILLED_ROWS_FOR_LEVEL_UP: u32 = 10;

/// The falling delay is multiplied and divided by these on every level up.
pub const DELAY_FACTOR_FOR_LEVEL_UP: u32 = 9;
pub const DELAY_DIVISOR_FOR_LEVEL_UP: u32 = 10;

/// DAS (Delayed Auto Shift) initial delay in milliseconds.
pub const DAS_DELAY_TIMER: i32 = 200;

/// DAS repeat interval for left, right and down moves.
pub const DAS_MOVE_TIMER: i32 = 40;

/// Rotation auto-repeat initial delay.
pub const ROTATION_AUTOREPEAT_DELAY: i32 = 375;

/// Rotation auto-repeat interval.
pub const ROTATION_AUTOREPEAT_TIMER: i32 = 200;

/// Value of a disarmed autoshift timer.
pub const TIMER_INACTIVE: i32 = -1;

/// Host frame period (16ms, about 60 ticks per second).
pub const TICK_MS: u64 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_timing_defaults() {
        assert_eq!(INIT_DELAY_FALL, 1000);
        assert_eq!(DAS_DELAY_TIMER, 200);
        assert_eq!(DAS_MOVE_TIMER, 40);
        assert_eq!(ROTATION_AUTOREPEAT_DELAY, 375);
        assert_eq!(ROTATION_AUTOREPEAT_TIMER, 200);
        assert!(DAS_MOVE_TIMER < DAS_DELAY_TIMER);
        assert!(ROTATION_AUTOREPEAT_TIMER < ROTATION_AUTOREPEAT_DELAY);
    }

    #[test]
    fn event_set_insert_and_clear() {
        let mut set = EventSet::NONE;
        assert!(set.is_empty());

        set.insert(GameEvent::MoveRight);
        set.insert(GameEvent::Drop);
        assert!(set.contains(GameEvent::MoveRight));
        assert!(set.contains(GameEvent::Drop));
        assert!(!set.contains(GameEvent::MoveLeft));

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn tetromino_type_index_roundtrip() {
        for (i, kind) in TetrominoType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(TetrominoType::from_index(i as u32), *kind);
        }
        assert_eq!(TetrominoType::from_index(7), TetrominoType::I);
    }

    #[test]
    fn error_code_values_match_reference() {
        assert_eq!(ErrorCode::None as i32, 0);
        assert_eq!(ErrorCode::PlayerQuits as i32, 1);
        assert_eq!(ErrorCode::NoVideo as i32, -2);
        assert_eq!(ErrorCode::Assert as i32, -100);
        assert!(ErrorCode::None.is_nominal());
        assert!(!ErrorCode::PlayerQuits.is_nominal());
    }
}

/// The seven tetromino types
///
/// Each type has a fixed color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I = 0,
    O = 1,
    T = 2,
    S = 3,
    Z = 4,
    J = 5,
    L = 6,
}

impl TetrominoType {
    /// All types in index order.
    pub const ALL: [TetrominoType; TETROMINO_TYPES] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    /// Index used for per-type statistics.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pick a type from an arbitrary non-negative random value (`value % 7`).
    ///
    /// # Examples
    ///
    /// ```
    /// use stc_tetris_types::TetrominoType;
    ///
    /// assert_eq!(TetrominoType::from_index(0), TetrominoType::I);
    /// assert_eq!(TetrominoType::from_index(13), TetrominoType::L);
    /// ```
    pub fn from_index(value: u32) -> Self {
        Self::ALL[(value % TETROMINO_TYPES as u32) as usize]
    }

    /// Fixed palette color of this type.
    pub fn color(self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Purple,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Orange,
        }
    }

    /// Parse type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stc_tetris_types::TetrominoType;
    ///
    /// assert_eq!(TetrominoType::from_str("i"), Some(TetrominoType::I));
    /// assert_eq!(TetrominoType::from_str("O"), Some(TetrominoType::O));
    /// assert_eq!(TetrominoType::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TetrominoType::I),
            "o" => Some(TetrominoType::O),
            "t" => Some(TetrominoType::T),
            "s" => Some(TetrominoType::S),
            "z" => Some(TetrominoType::Z),
            "j" => Some(TetrominoType::J),
            "l" => Some(TetrominoType::L),
            _ => None,
        }
    }

    /// Upper-case one-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoType::I => "I",
            TetrominoType::O => "O",
            TetrominoType::T => "T",
            TetrominoType::S => "S",
            TetrominoType::Z => "Z",
            TetrominoType::J => "J",
            TetrominoType::L => "L",
        }
    }
}

/// Cell color indexes.
///
/// `White` (0) is reserved for UI effects and never stored by gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Cyan = 1,
    Red = 2,
    Blue = 3,
    Orange = 4,
    Green = 5,
    Yellow = 6,
    Purple = 7,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked tetromino of that color
pub type Cell = Option<Color>;

/// Logical commands delivered by the host as start/end edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Rotate clockwise
    RotateCw,
    /// Rotate counter-clockwise
    RotateCcw,
    Drop,
    Pause,
    Restart,
    /// Toggle the next-piece preview
    ShowNext,
    /// Toggle the ghost shadow
    ShowShadow,
    Quit,
}

impl GameEvent {
    /// Bit used for this command in an [`EventSet`].
    pub const fn bit(self) -> u16 {
        match self {
            GameEvent::MoveDown => 1,
            GameEvent::MoveLeft => 1 << 1,
            GameEvent::MoveRight => 1 << 2,
            GameEvent::RotateCw => 1 << 3,
            GameEvent::RotateCcw => 1 << 4,
            GameEvent::Drop => 1 << 5,
            GameEvent::Pause => 1 << 6,
            GameEvent::Restart => 1 << 7,
            GameEvent::ShowNext => 1 << 8,
            GameEvent::ShowShadow => 1 << 9,
            GameEvent::Quit => 1 << 10,
        }
    }
}

/// Accumulated command bits, consumed once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct EventSet(u16);

impl EventSet {
    pub const NONE: EventSet = EventSet(0);

    pub fn insert(&mut self, event: GameEvent) {
        self.0 |= event.bit();
    }

    pub fn contains(&self, event: GameEvent) -> bool {
        self.0 & event.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// An input edge: a command was pressed (`start`) or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub event: GameEvent,
    pub start: bool,
}

impl InputEvent {
    pub fn start(event: GameEvent) -> Self {
        Self { event, start: true }
    }

    pub fn end(event: GameEvent) -> Self {
        Self { event, start: false }
    }
}

/// Game status codes.
///
/// The host polls this after every tick; anything but `None` ends the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Everything is OK
    None = 0,
    /// The player asked to quit
    PlayerQuits = 1,
    NoMemory = -1,
    /// Video system was not initialized
    NoVideo = -2,
    /// Problem loading image files
    NoImages = -3,
    /// Problem creating the platform
    Platform = -4,
    /// Internal bookkeeping went wrong
    Assert = -100,
}

impl ErrorCode {
    pub fn is_nominal(self) -> bool {
        self == ErrorCode::None
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::None => "no error",
            ErrorCode::PlayerQuits => "player quits",
            ErrorCode::NoMemory => "not enough memory",
            ErrorCode::NoVideo => "video system was not initialized",
            ErrorCode::NoImages => "problem loading image files",
            ErrorCode::Platform => "problem creating platform",
            ErrorCode::Assert => "internal assertion failed",
        };
        f.write_str(s)
    }
}
