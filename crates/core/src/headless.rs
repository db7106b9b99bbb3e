//! Headless platform - a scripted host for tests, benchmarks and simulations
//!
//! The clock only moves when told to, input edges are queued by the caller and
//! every notification is counted.
//!
//! ```
//! use stc_tetris_core::{Game, GameConfig, HeadlessPlatform};
//! use stc_tetris_core::types::GameEvent;
//!
//! let mut game = Game::new(HeadlessPlatform::new(1), GameConfig::default());
//! game.initialize().unwrap();
//!
//! let x = game.falling_block().x;
//! game.platform_mut().tap(GameEvent::MoveRight);
//! game.update();
//! assert_eq!(game.falling_block().x, x + 1);
//! ```

use std::collections::VecDeque;

use crate::error::GameError;
use crate::platform::{InputBuffer, Platform};
use crate::rng::{ScriptedRandom, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::{GameEvent, InputEvent};

#[derive(Debug, Clone)]
enum RandomSource {
    Lcg(SimpleRng),
    Script(ScriptedRandom),
}

/// Counters of the platform calls made by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Notifications {
    pub initialized: bool,
    pub ended: bool,
    pub lines_completed: u32,
    pub pieces_dropped: u32,
    pub tetromino_moves: u32,
    pub frames_rendered: u32,
}

#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    now_ms: u64,
    random: RandomSource,
    pending: VecDeque<InputEvent>,
    init_error: Option<GameError>,
    notifications: Notifications,
    last_frame: Option<GameSnapshot>,
}

impl HeadlessPlatform {
    /// Platform drawing pieces from a seeded LCG.
    pub fn new(seed: u32) -> Self {
        Self::with_source(RandomSource::Lcg(SimpleRng::new(seed)))
    }

    /// Platform replaying `values` as its random sequence.
    pub fn scripted(values: impl Into<Vec<u32>>) -> Self {
        Self::with_source(RandomSource::Script(ScriptedRandom::new(values)))
    }

    fn with_source(random: RandomSource) -> Self {
        Self {
            now_ms: 0,
            random,
            pending: VecDeque::new(),
            init_error: None,
            notifications: Notifications::default(),
            last_frame: None,
        }
    }

    /// Make `init` fail with `error`.
    pub fn with_init_error(mut self, error: GameError) -> Self {
        self.init_error = Some(error);
        self
    }

    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn set_time(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Queue a key press for the next tick.
    pub fn press(&mut self, event: GameEvent) {
        self.pending.push_back(InputEvent::start(event));
    }

    /// Queue a key release for the next tick.
    pub fn release(&mut self, event: GameEvent) {
        self.pending.push_back(InputEvent::end(event));
    }

    /// Queue a press immediately followed by its release.
    pub fn tap(&mut self, event: GameEvent) {
        self.press(event);
        self.release(event);
    }

    pub fn notifications(&self) -> Notifications {
        self.notifications
    }

    pub fn last_frame(&self) -> Option<&GameSnapshot> {
        self.last_frame.as_ref()
    }
}

impl Platform for HeadlessPlatform {
    fn init(&mut self) -> Result<(), GameError> {
        if let Some(err) = self.init_error.clone() {
            return Err(err);
        }
        self.notifications.initialized = true;
        Ok(())
    }

    fn end(&mut self) {
        self.notifications.ended = true;
    }

    fn process_events(&mut self, input: &mut InputBuffer) {
        while !input.is_full() {
            match self.pending.pop_front() {
                Some(event) => input.push(event),
                None => break,
            }
        }
    }

    fn render_game(&mut self, frame: &GameSnapshot) {
        self.notifications.frames_rendered += 1;
        self.last_frame = Some(*frame);
    }

    fn system_time(&self) -> u64 {
        self.now_ms
    }

    fn random(&mut self) -> u32 {
        match &mut self.random {
            RandomSource::Lcg(rng) => rng.next_u32(),
            RandomSource::Script(script) => script.next_u32(),
        }
    }

    fn on_line_completed(&mut self) {
        self.notifications.lines_completed += 1;
    }

    fn on_piece_drop(&mut self) {
        self.notifications.pieces_dropped += 1;
    }

    fn on_tetromino_moved(&mut self) {
        self.notifications.tetromino_moves += 1;
    }
}
