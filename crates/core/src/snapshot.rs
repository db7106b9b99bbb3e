use crate::game::GameState;
use crate::scoring::Stats;
use crate::tetromino::Tetromino;
use crate::types::{Cell, ErrorCode, TetrominoType, BOARD_HEIGHT, BOARD_WIDTH};

/// Board rows as handed to renderers: `board[y][x]`.
pub type BoardRows = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Everything a renderer needs for one frame. Plain `Copy` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardRows,
    pub falling: Tetromino,
    pub next: Tetromino,
    pub stats: Stats,
    pub state: GameState,
    pub show_preview: bool,
    pub show_shadow: bool,
    /// Rows the falling piece can still fall before it rests.
    pub shadow_gap: i8,
    /// The game changed since the host last acknowledged a change.
    pub state_changed: bool,
    pub error_code: ErrorCode,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Row the ghost piece is drawn at, when the shadow is shown.
    pub fn ghost_y(&self) -> Option<i8> {
        if self.show_shadow && self.state != GameState::GameOver {
            Some(self.falling.y + self.shadow_gap)
        } else {
            None
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            falling: Tetromino::new(TetrominoType::I),
            next: Tetromino::new(TetrominoType::I),
            stats: Stats::default(),
            state: GameState::Playing,
            show_preview: true,
            show_shadow: true,
            shadow_gap: 0,
            state_changed: false,
            error_code: ErrorCode::None,
        }
    }
}
