//! Platform contract
//!
//! Everything host-specific sits behind [`Platform`]: input polling, drawing,
//! the millisecond clock and the random source. The controller owns exactly one
//! implementation and calls it synchronously from `update`.

use arrayvec::ArrayVec;

use crate::error::GameError;
use crate::snapshot::GameSnapshot;
use crate::types::InputEvent;

/// Maximum input edges accepted per tick. Extra edges are dropped by the host.
pub const INPUT_BUFFER_CAPACITY: usize = 32;

/// Input edges collected for one tick.
pub type InputBuffer = ArrayVec<InputEvent, INPUT_BUFFER_CAPACITY>;

pub trait Platform {
    /// Acquire host resources. Called once by `Game::initialize`.
    fn init(&mut self) -> Result<(), GameError>;

    /// Release host resources.
    fn end(&mut self);

    /// Push the command edges received since the previous call.
    fn process_events(&mut self, input: &mut InputBuffer);

    /// Draw the current frame.
    fn render_game(&mut self, frame: &GameSnapshot);

    /// Monotonic time in milliseconds.
    fn system_time(&self) -> u64;

    /// Non-negative random value; only `value % 7` is used.
    fn random(&mut self) -> u32;

    /// One or more rows were removed.
    fn on_line_completed(&mut self) {}

    /// A hard drop finished.
    fn on_piece_drop(&mut self) {}

    /// The falling piece moved, rotated, locked or was replaced.
    fn on_tetromino_moved(&mut self) {}
}
