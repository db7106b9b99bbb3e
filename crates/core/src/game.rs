//! Game controller - owns the board, the two live pieces and the input timers
//!
//! The controller is driven by one call to [`Game::update`] per frame:
//!
//! 1. Input edges are pulled from the platform and mapped into event bits,
//!    arming or disarming the autoshift timers.
//! 2. Armed timers advance by the frame delta and re-inject repeat events.
//! 3. PAUSE toggles the pause flag and discards everything else queued.
//! 4. While paused, elapsed time is folded into the last fall timestamp so
//!    gravity resumes where it stopped.
//! 5. Otherwise the event bits are drained in a fixed order, gravity runs, and
//!    the platform receives a snapshot to draw.
//!
//! Piece lifecycle: spawn at row 0 centered, move and rotate, lock when a
//! downward move collides, clear full rows, promote the preview piece.

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::platform::{InputBuffer, Platform};
use crate::scoring::{self, Stats};
use crate::snapshot::GameSnapshot;
use crate::tetromino::{try_rotate, Tetromino};
use crate::types::{
    Cell, ErrorCode, EventSet, GameEvent, TetrominoType, TIMER_INACTIVE,
};

/// High-level game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// Autoshift countdowns in milliseconds; `TIMER_INACTIVE` when disarmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AutoshiftTimers {
    down: i32,
    left: i32,
    right: i32,
    rotation: i32,
}

impl AutoshiftTimers {
    const DISARMED: Self = Self {
        down: TIMER_INACTIVE,
        left: TIMER_INACTIVE,
        right: TIMER_INACTIVE,
        rotation: TIMER_INACTIVE,
    };
}

/// Count down an armed timer; on expiry re-arm it to `repeat` and report it.
fn tick_timer(timer: &mut i32, delta: i32, repeat: i32) -> bool {
    if *timer <= 0 {
        return false;
    }
    *timer -= delta;
    if *timer <= 0 {
        *timer = repeat;
        return true;
    }
    false
}

/// The game controller.
pub struct Game<P: Platform> {
    platform: P,
    config: GameConfig,
    board: Board,
    falling: Tetromino,
    next: Tetromino,
    stats: Stats,
    events: EventSet,
    input: InputBuffer,
    frame: GameSnapshot,
    timers: AutoshiftTimers,
    error_code: ErrorCode,
    initialized: bool,
    system_time: u64,
    last_fall_time: u64,
    falling_delay: u32,
    is_over: bool,
    is_paused: bool,
    show_preview: bool,
    show_shadow: bool,
    shadow_gap: i8,
    state_changed: bool,
    state_moved: bool,
}

impl<P: Platform> Game<P> {
    /// Create a controller around `platform`. Nothing runs until [`Game::initialize`].
    pub fn new(platform: P, config: GameConfig) -> Self {
        Self {
            platform,
            config,
            board: Board::new(),
            falling: Tetromino::new(TetrominoType::I),
            next: Tetromino::new(TetrominoType::I),
            stats: Stats::default(),
            events: EventSet::NONE,
            input: InputBuffer::new(),
            frame: GameSnapshot::default(),
            timers: AutoshiftTimers::DISARMED,
            error_code: ErrorCode::None,
            initialized: false,
            system_time: 0,
            last_fall_time: 0,
            falling_delay: config.init_delay_fall,
            is_over: false,
            is_paused: false,
            show_preview: true,
            show_shadow: config.shadow_enabled,
            shadow_gap: 0,
            state_changed: false,
            state_moved: false,
        }
    }

    /// Initialize the platform, then start the first game.
    ///
    /// On failure the platform's error code is kept in [`Game::error_code`] and
    /// the game stays stopped.
    pub fn initialize(&mut self) -> Result<(), GameError> {
        if let Err(err) = self.platform.init() {
            self.error_code = err.code();
            return Err(err);
        }
        self.error_code = ErrorCode::None;
        self.initialized = true;
        self.start();
        Ok(())
    }

    /// Reset board, statistics and timers and spawn two fresh pieces.
    pub fn restart(&mut self) {
        if self.initialized {
            self.start();
        }
    }

    fn start(&mut self) {
        self.system_time = self.platform.system_time();
        self.last_fall_time = self.system_time;
        self.falling_delay = self.config.init_delay_fall;
        self.board.clear();
        self.stats = Stats::default();
        self.events.clear();
        self.timers = AutoshiftTimers::DISARMED;
        self.is_over = false;
        self.is_paused = false;
        self.show_preview = true;
        self.show_shadow = self.config.shadow_enabled;

        self.falling = Tetromino::new(self.random_type());
        self.next = Tetromino::new(self.random_type());
        self.on_tetromino_moved();
    }

    /// Release the platform.
    pub fn end(&mut self) {
        self.platform.end();
        self.initialized = false;
    }

    /// Run one frame: input, timers, commands, gravity, render.
    pub fn update(&mut self) {
        if !self.initialized {
            return;
        }

        self.poll_input();

        if self.is_over {
            if self.events.contains(GameEvent::Restart) {
                self.start();
            }
        } else {
            let now = self.platform.system_time();
            let elapsed = now.saturating_sub(self.system_time);
            let delta = elapsed.min(i32::MAX as u64) as i32;

            self.advance_timers(delta);

            if self.events.contains(GameEvent::Pause) {
                self.is_paused = !self.is_paused;
                self.events.clear();
                self.state_changed = true;
            }

            if self.is_paused {
                // Frozen gravity: keep the fall interval where it was.
                self.last_fall_time += elapsed;
            } else {
                if !self.events.is_empty() {
                    self.apply_events();
                    self.events.clear();
                }

                if !self.is_over
                    && now.saturating_sub(self.last_fall_time) >= self.falling_delay as u64
                {
                    self.move_tetromino(0, 1);
                    self.last_fall_time = now;
                }
            }
            self.system_time = now;
        }

        let mut frame = std::mem::take(&mut self.frame);
        self.snapshot_into(&mut frame);
        self.platform.render_game(&frame);
        self.frame = frame;
    }

    fn poll_input(&mut self) {
        self.input.clear();
        self.platform.process_events(&mut self.input);
        for i in 0..self.input.len() {
            let edge = self.input[i];
            if edge.start {
                self.on_event_start(edge.event);
            } else {
                self.on_event_end(edge.event);
            }
        }
    }

    fn advance_timers(&mut self, delta: i32) {
        let repeat = self.config.das_move;

        if tick_timer(&mut self.timers.down, delta, repeat) {
            self.events.insert(GameEvent::MoveDown);
        }

        // Left is checked first; right only runs while left is disarmed.
        if self.timers.left > 0 {
            if tick_timer(&mut self.timers.left, delta, repeat) {
                self.events.insert(GameEvent::MoveLeft);
            }
        } else if tick_timer(&mut self.timers.right, delta, repeat) {
            self.events.insert(GameEvent::MoveRight);
        }

        if self.config.auto_rotation
            && tick_timer(
                &mut self.timers.rotation,
                delta,
                self.config.rotation_repeat,
            )
        {
            self.events.insert(GameEvent::RotateCw);
        }
    }

    /// Drain the queued commands in their fixed order.
    fn apply_events(&mut self) {
        let events = self.events;

        if events.contains(GameEvent::ShowNext) {
            self.show_preview = !self.show_preview;
            self.state_changed = true;
        }
        if events.contains(GameEvent::ShowShadow) && self.config.shadow_enabled {
            self.show_shadow = !self.show_shadow;
            self.state_changed = true;
        }

        if events.contains(GameEvent::Drop) {
            self.drop_tetromino();
        }
        if self.is_over {
            return;
        }

        if events.contains(GameEvent::RotateCw) {
            self.rotate_tetromino(true);
        }
        if events.contains(GameEvent::RotateCcw) {
            self.rotate_tetromino(false);
        }

        if events.contains(GameEvent::MoveRight) {
            self.move_tetromino(1, 0);
        } else if events.contains(GameEvent::MoveLeft) {
            self.move_tetromino(-1, 0);
        }

        if events.contains(GameEvent::MoveDown) {
            // Awarded at the level in effect before the move locks anything.
            self.stats.score += scoring::move_down_bonus(self.stats.level);
            self.move_tetromino(0, 1);
        }
    }

    /// A command key went down.
    pub fn on_event_start(&mut self, event: GameEvent) {
        match event {
            GameEvent::Quit => {
                self.error_code = ErrorCode::PlayerQuits;
                return;
            }
            GameEvent::MoveDown => self.timers.down = self.config.das_delay,
            GameEvent::MoveLeft => self.timers.left = self.config.das_delay,
            GameEvent::MoveRight => self.timers.right = self.config.das_delay,
            GameEvent::RotateCw => {
                if self.config.auto_rotation {
                    self.timers.rotation = self.config.rotation_delay;
                }
            }
            GameEvent::RotateCcw
            | GameEvent::Drop
            | GameEvent::Pause
            | GameEvent::Restart
            | GameEvent::ShowNext
            | GameEvent::ShowShadow => {}
        }
        self.events.insert(event);
    }

    /// A command key went up. Only disarms timers; queued bits stay.
    pub fn on_event_end(&mut self, event: GameEvent) {
        match event {
            GameEvent::MoveDown => self.timers.down = TIMER_INACTIVE,
            GameEvent::MoveLeft => self.timers.left = TIMER_INACTIVE,
            GameEvent::MoveRight => self.timers.right = TIMER_INACTIVE,
            GameEvent::RotateCw => self.timers.rotation = TIMER_INACTIVE,
            _ => {}
        }
    }

    /// Translate the falling piece, or lock it when a one-row fall collides.
    fn move_tetromino(&mut self, dx: i8, dy: i8) {
        if !self.board.collides(&self.falling, dx, dy) {
            self.falling.x += dx;
            self.falling.y += dy;
            self.on_tetromino_moved();
            return;
        }

        if dy == 1 {
            if self.falling.y <= 1 {
                self.is_over = true;
                self.state_changed = true;
            } else {
                self.lock_tetromino();
            }
        }
    }

    fn lock_tetromino(&mut self) {
        self.board.stamp(&self.falling);

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            self.on_filled_rows(cleared.len());
            self.platform.on_line_completed();
        }

        self.stats.total_pieces += 1;
        self.stats.pieces[self.falling.kind.index()] += 1;

        self.falling = self.next;
        self.falling.reset_position();
        self.next = Tetromino::new(self.random_type());
        self.on_tetromino_moved();
    }

    /// Score `rows` rows cleared by one lock and apply the level threshold.
    fn on_filled_rows(&mut self, rows: usize) {
        self.stats.lines += rows as u32;

        match scoring::filled_rows_score(rows, self.stats.level) {
            Some(points) => self.stats.score += points,
            None => {
                eprintln!("[Core] {} rows cleared by a single lock", rows);
                self.error_code = ErrorCode::Assert;
                return;
            }
        }

        if scoring::should_level_up(self.stats.lines, self.stats.level) {
            self.stats.level += 1;
            self.falling_delay = scoring::next_falling_delay(self.falling_delay);
        }
    }

    /// Hard drop: jump to the shadow row, then lock through a forced fall.
    fn drop_tetromino(&mut self) {
        self.falling.y += self.shadow_gap;
        self.move_tetromino(0, 1);
        self.stats.score += scoring::drop_bonus(self.stats.level, self.show_shadow);
        self.platform.on_piece_drop();
    }

    fn rotate_tetromino(&mut self, clockwise: bool) {
        if let Some(rotated) =
            try_rotate(&self.falling, &self.board, clockwise, self.config.wall_kick)
        {
            self.falling = rotated;
            self.on_tetromino_moved();
        }
    }

    fn on_tetromino_moved(&mut self) {
        self.shadow_gap = self.compute_shadow_gap();
        self.state_moved = true;
        self.state_changed = true;
        self.platform.on_tetromino_moved();
    }

    /// Rows the falling piece can drop before colliding. The floor bounds the search.
    fn compute_shadow_gap(&self) -> i8 {
        let mut dy = 0;
        while !self.board.collides(&self.falling, 0, dy + 1) {
            dy += 1;
        }
        dy
    }

    fn random_type(&mut self) -> TetrominoType {
        TetrominoType::from_index(self.platform.random())
    }

    /// Cell at column `x`, row `y`; empty outside the board.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        self.board.get(x, y).flatten()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling_block(&self) -> &Tetromino {
        &self.falling
    }

    pub fn next_block(&self) -> &Tetromino {
        &self.next
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        if self.is_over {
            GameState::GameOver
        } else if self.is_paused {
            GameState::Paused
        } else {
            GameState::Playing
        }
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview
    }

    pub fn show_shadow(&self) -> bool {
        self.show_shadow
    }

    pub fn shadow_gap(&self) -> i8 {
        self.shadow_gap
    }

    /// Current gravity period in milliseconds.
    pub fn falling_delay(&self) -> u32 {
        self.falling_delay
    }

    pub fn has_changed(&self) -> bool {
        self.state_changed
    }

    pub fn on_change_processed(&mut self) {
        self.state_changed = false;
    }

    pub fn has_moved(&self) -> bool {
        self.state_moved
    }

    pub fn on_move_processed(&mut self) {
        self.state_moved = false;
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill a caller-owned snapshot without allocating.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_rows(&mut out.board);
        out.falling = self.falling;
        out.next = self.next;
        out.stats = self.stats;
        out.state = self.state();
        out.show_preview = self.show_preview;
        out.show_shadow = self.show_shadow;
        out.shadow_gap = self.shadow_gap;
        out.state_changed = self.state_changed;
        out.error_code = self.error_code;
    }
}
