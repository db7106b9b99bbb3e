//! Board module - manages the game grid
//!
//! The board is a 10x22 grid where each cell is empty or holds the color of a
//! locked tetromino cell. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (top to bottom).
//! Row 0 is the spawn row; it is never scanned for full rows.

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one scan, in scan order (top to bottom).
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `piece`, displaced by (dx, dy), would leave the side walls,
    /// go through the floor or overlap a locked cell.
    ///
    /// There is no ceiling: occupied cells above row 0 only need to be inside the
    /// side walls. Only the `size x size` sub-square of the piece is read.
    pub fn collides(&self, piece: &Tetromino, dx: i8, dy: i8) -> bool {
        let new_x = piece.x + dx;
        let new_y = piece.y + dy;

        for (i, j, _) in piece.occupied() {
            let x = new_x + i;
            let y = new_y + j;
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return true;
            }
            if self.is_occupied(x, y) {
                return true;
            }
        }
        false
    }

    /// Copy every occupied cell of `piece` into the grid at its current position.
    ///
    /// Callers only stamp pieces that passed a collision check, so every cell lands
    /// inside the grid.
    pub fn stamp(&mut self, piece: &Tetromino) {
        for (i, j, color) in piece.occupied() {
            self.set(piece.x + i, piece.y + j, Some(color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y` by copying every row above it one row down.
    ///
    /// Row 0 keeps its content.
    fn collapse_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }
    }

    /// Scan rows 1..HEIGHT top to bottom and remove every full row.
    ///
    /// Returns the indices of the removed rows in scan order. Rows found full in
    /// the same pass are all removed before returning.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 1..BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                self.collapse_row(y);
                cleared.push(y as u8);
            }
        }
        cleared
    }

    /// Write the grid into a row-major 2D array (`rows[y][x]`).
    pub fn write_rows(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, TetrominoType};

    fn fill_row(board: &mut Board, y: i8, except: Option<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if Some(x) != except {
                board.set(x, y, Some(Color::Red));
            }
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 21), Some(219));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 22), None);
    }

    #[test]
    fn test_collapse_row_copies_top_down_and_keeps_row_zero() {
        let mut board = Board::new();
        board.set(2, 0, Some(Color::Cyan));
        board.set(4, 19, Some(Color::Blue));
        fill_row(&mut board, 20, None);

        board.collapse_row(20);

        assert_eq!(board.get(4, 20), Some(Some(Color::Blue)));
        assert_eq!(board.get(4, 19), Some(None));
        // Row 0 was copied into row 1 and left in place.
        assert_eq!(board.get(2, 1), Some(Some(Color::Cyan)));
        assert_eq!(board.get(2, 0), Some(Some(Color::Cyan)));
    }

    #[test]
    fn test_row_zero_is_never_cleared() {
        let mut board = Board::new();
        fill_row(&mut board, 0, None);
        assert!(board.clear_full_rows().is_empty());
        assert!(board.is_row_full(0));
    }

    #[test]
    fn test_clear_non_adjacent_rows_in_one_pass() {
        let mut board = Board::new();
        fill_row(&mut board, 21, None);
        fill_row(&mut board, 20, Some(3));
        fill_row(&mut board, 19, None);
        board.set(7, 18, Some(Color::Green));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 21]);

        // The partial row 20 ends at the bottom, the stray cell right above it.
        assert!(!board.is_row_full(21));
        assert_eq!(board.get(3, 21), Some(None));
        assert_eq!(board.get(0, 21), Some(Some(Color::Red)));
        assert_eq!(board.get(7, 20), Some(Some(Color::Green)));
        for x in 0..BOARD_WIDTH as i8 {
            if x != 7 {
                assert_eq!(board.get(x, 20), Some(None));
            }
        }
    }

    #[test]
    fn test_collides_ignores_rows_above_board() {
        let board = Board::new();
        let mut piece = Tetromino::new(TetrominoType::T);
        piece.y = -2;
        assert!(!board.collides(&piece, 0, 0));
        piece.x = -1;
        assert!(board.collides(&piece, 0, 0));
    }

    #[test]
    fn test_write_rows_matches_get() {
        let mut board = Board::new();
        board.set(9, 21, Some(Color::Orange));
        board.set(0, 3, Some(Color::Purple));

        let mut rows = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_rows(&mut rows);
        assert_eq!(rows[21][9], Some(Color::Orange));
        assert_eq!(rows[3][0], Some(Color::Purple));
        assert_eq!(rows.iter().flatten().filter(|c| c.is_some()).count(), 2);
    }
}
