//! Scoring module - points, bonuses and level progression
//!
//! | Event | Points |
//! |-------|--------|
//! | 1 row | 400 x (level + 1) |
//! | 2 rows | 1000 x (level + 1) |
//! | 3 rows | 3000 x (level + 1) |
//! | 4 rows | 12000 x (level + 1) |
//! | Move down | 1000 x (level + 1) / 1000 |
//! | Hard drop | 1000 x (level + 1) / 100 with shadow, / 20 without |
//!
//! A level is gained once `lines >= 10 x (level + 1)`; the gravity period is then
//! rescaled by 9/10 with truncating integer math.

use crate::types::{
    TetrominoType, DELAY_DIVISOR_FOR_LEVEL_UP, DELAY_FACTOR_FOR_LEVEL_UP,
    FILLED_ROWS_FOR_LEVEL_UP, SCORE_1_FILLED_ROW, SCORE_2_FILLED_ROW, SCORE_3_FILLED_ROW,
    SCORE_4_FILLED_ROW, SCORE_DROP_DIVISOR, SCORE_DROP_WITH_SHADOW_DIVISOR,
    SCORE_MOVE_DOWN_DIVISOR, TETROMINO_TYPES,
};

/// Game statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stats {
    pub score: u64,
    pub lines: u32,
    pub total_pieces: u32,
    pub level: u32,
    /// Locked pieces per type, indexed by [`TetrominoType::index`].
    pub pieces: [u32; TETROMINO_TYPES],
}

impl Stats {
    pub fn pieces_of(&self, kind: TetrominoType) -> u32 {
        self.pieces[kind.index()]
    }
}

/// Points for `rows` rows cleared by a single lock, or `None` for a row count a
/// tetromino cannot produce.
pub fn filled_rows_score(rows: usize, level: u32) -> Option<u64> {
    let base = match rows {
        1 => SCORE_1_FILLED_ROW,
        2 => SCORE_2_FILLED_ROW,
        3 => SCORE_3_FILLED_ROW,
        4 => SCORE_4_FILLED_ROW,
        _ => return None,
    };
    Some(base * (level as u64 + 1))
}

/// Bonus for a player-initiated one-row move down.
pub fn move_down_bonus(level: u32) -> u64 {
    SCORE_2_FILLED_ROW * (level as u64 + 1) / SCORE_MOVE_DOWN_DIVISOR
}

/// Bonus for a hard drop.
pub fn drop_bonus(level: u32, shadow_shown: bool) -> u64 {
    let divisor = if shadow_shown {
        SCORE_DROP_WITH_SHADOW_DIVISOR
    } else {
        SCORE_DROP_DIVISOR
    };
    SCORE_2_FILLED_ROW * (level as u64 + 1) / divisor
}

/// Whether `lines` total cleared rows earn the level after `level`.
pub fn should_level_up(lines: u32, level: u32) -> bool {
    lines >= FILLED_ROWS_FOR_LEVEL_UP * (level + 1)
}

/// Gravity period after a level up.
pub fn next_falling_delay(delay: u32) -> u32 {
    DELAY_FACTOR_FOR_LEVEL_UP * delay / DELAY_DIVISOR_FOR_LEVEL_UP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rows_score_table() {
        assert_eq!(filled_rows_score(1, 0), Some(400));
        assert_eq!(filled_rows_score(2, 0), Some(1000));
        assert_eq!(filled_rows_score(3, 0), Some(3000));
        assert_eq!(filled_rows_score(4, 0), Some(12000));
        assert_eq!(filled_rows_score(1, 4), Some(2000));
        assert_eq!(filled_rows_score(4, 2), Some(36000));
    }

    #[test]
    fn test_impossible_row_counts() {
        assert_eq!(filled_rows_score(0, 0), None);
        assert_eq!(filled_rows_score(5, 3), None);
    }

    #[test]
    fn test_bonuses() {
        assert_eq!(move_down_bonus(0), 1);
        assert_eq!(move_down_bonus(9), 10);
        assert_eq!(drop_bonus(0, true), 10);
        assert_eq!(drop_bonus(0, false), 50);
        assert_eq!(drop_bonus(3, true), 40);
    }

    #[test]
    fn test_level_threshold() {
        assert!(!should_level_up(9, 0));
        assert!(should_level_up(10, 0));
        assert!(!should_level_up(19, 1));
        assert!(should_level_up(20, 1));
    }

    #[test]
    fn test_delay_rescale_truncates() {
        assert_eq!(next_falling_delay(1000), 900);
        assert_eq!(next_falling_delay(900), 810);
        assert_eq!(next_falling_delay(810), 729);
        assert_eq!(next_falling_delay(729), 656);
    }
}
