//! Tetromino module - spawn shapes, rotation and wall kick
//!
//! Every piece lives in a 4x4 cell buffer indexed `cells[x][y]`. Only the
//! `size x size` sub-square (4 for I, 2 for O, 3 otherwise) is meaningful.
//! Rotation maps the sub-square onto itself; there are no kick tables, just a
//! horizontal shift that pulls the piece back inside the side walls.

use crate::board::Board;
use crate::types::{Cell, Color, TetrominoType, BOARD_WIDTH, TETROMINO_SIZE};

/// Cell buffer of a piece, indexed `[x][y]`.
pub type PieceCells = [[Cell; TETROMINO_SIZE]; TETROMINO_SIZE];

/// A piece: its cells, bounding box size and board position of the box's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub cells: PieceCells,
    pub x: i8,
    pub y: i8,
    pub size: u8,
    pub kind: TetrominoType,
}

impl Tetromino {
    /// Build the spawn shape of `kind`, centered horizontally on row 0.
    pub fn new(kind: TetrominoType) -> Self {
        let (cells, size) = spawn_shape(kind);
        let mut piece = Self {
            cells,
            x: 0,
            y: 0,
            size,
            kind,
        };
        piece.reset_position();
        piece
    }

    /// Move the bounding box to the spawn position: `x = (W - size) / 2`, `y = 0`.
    pub fn reset_position(&mut self) {
        self.x = ((BOARD_WIDTH - self.size) / 2) as i8;
        self.y = 0;
    }

    /// Occupied cells of the sub-square as `(i, j, color)` offsets from the box origin.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8, Color)> + '_ {
        let size = self.size as usize;
        (0..size).flat_map(move |i| {
            (0..size).filter_map(move |j| self.cells[i][j].map(|color| (i as i8, j as i8, color)))
        })
    }

    /// Whether column `i` of the sub-square holds any cell.
    fn column_occupied(&self, i: i8) -> bool {
        let size = self.size as usize;
        self.cells[i as usize][..size].iter().any(|cell| cell.is_some())
    }
}

/// Spawn cells and bounding box size of each type.
///
/// ```text
/// I: ....   O: ##   T: .#.   S: .##   Z: ##.   J: #..   L: ..#
///    ####      ##      ###      ##.      .##      ###      ###
/// ```
pub fn spawn_shape(kind: TetrominoType) -> (PieceCells, u8) {
    let color = Some(kind.color());
    let mut cells: PieceCells = [[None; TETROMINO_SIZE]; TETROMINO_SIZE];

    let (size, offsets): (u8, [(usize, usize); 4]) = match kind {
        TetrominoType::I => (4, [(0, 1), (1, 1), (2, 1), (3, 1)]),
        TetrominoType::O => (2, [(0, 0), (0, 1), (1, 0), (1, 1)]),
        TetrominoType::T => (3, [(0, 1), (1, 0), (1, 1), (2, 1)]),
        TetrominoType::S => (3, [(0, 1), (1, 0), (1, 1), (2, 0)]),
        TetrominoType::Z => (3, [(0, 0), (1, 0), (1, 1), (2, 1)]),
        TetrominoType::J => (3, [(0, 0), (0, 1), (1, 1), (2, 1)]),
        TetrominoType::L => (3, [(0, 1), (1, 1), (2, 0), (2, 1)]),
    };
    for (x, y) in offsets {
        cells[x][y] = color;
    }
    (cells, size)
}

/// Rotate the `size x size` sub-square of `cells` by 90 degrees.
///
/// Clockwise moves `cells[i][j]` to `[size-1-j][i]`; counter-clockwise moves it
/// to `[j][size-1-i]`. Four rotations in the same direction are the identity.
pub fn rotate_cells(cells: &PieceCells, size: u8, clockwise: bool) -> PieceCells {
    let size = size as usize;
    let mut rotated: PieceCells = [[None; TETROMINO_SIZE]; TETROMINO_SIZE];
    for i in 0..size {
        for j in 0..size {
            if clockwise {
                rotated[size - 1 - j][i] = cells[i][j];
            } else {
                rotated[j][size - 1 - i] = cells[i][j];
            }
        }
    }
    rotated
}

/// Smallest horizontal shift that brings every occupied column of `piece`
/// back inside the side walls. Zero when the piece is already inside.
pub fn wall_kick_offset(piece: &Tetromino) -> i8 {
    let width = BOARD_WIDTH as i8;
    let size = piece.size as i8;

    if piece.x < 0 {
        // First occupied column left of the wall decides the shift.
        for i in 0..(-piece.x).min(size) {
            if piece.column_occupied(i) {
                return -(piece.x + i);
            }
        }
    } else if piece.x > width - size {
        for i in ((width - piece.x).max(0)..size).rev() {
            if piece.column_occupied(i) {
                return (width - 1) - (piece.x + i);
            }
        }
    }
    0
}

/// Rotate `piece` on `board`, optionally kicking it off the side walls.
///
/// Returns the rotated piece, or `None` when the result would collide (the O
/// piece never rotates).
pub fn try_rotate(
    piece: &Tetromino,
    board: &Board,
    clockwise: bool,
    wall_kick: bool,
) -> Option<Tetromino> {
    if piece.kind == TetrominoType::O {
        return None;
    }

    let mut candidate = Tetromino {
        cells: rotate_cells(&piece.cells, piece.size, clockwise),
        ..*piece
    };
    if wall_kick {
        candidate.x += wall_kick_offset(&candidate);
    }

    if board.collides(&candidate, 0, 0) {
        None
    } else {
        Some(candidate)
    }
}
