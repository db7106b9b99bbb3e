//! TerminalPlatform: the game's host in a real terminal.
//!
//! Input comes from non-blocking crossterm polling, frames go through
//! [`GameView`] and [`TerminalRenderer`], time is measured from process start
//! and pieces come from an entropy-seeded `StdRng`.

use std::time::{Duration, Instant};

use anyhow::Error;
use crossterm::event::{self, Event};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::core::{GameError, GameSnapshot, InputBuffer, Platform};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::input::{KeyTracker, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
use crate::renderer::TerminalRenderer;
use crate::types::{ErrorCode, GameEvent, InputEvent};

/// How long a side panel note stays on screen.
const NOTE_DURATION: Duration = Duration::from_millis(600);

pub struct TerminalPlatform {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    keys: KeyTracker,
    rng: StdRng,
    epoch: Instant,
    active: bool,
    needs_redraw: bool,
    note: Option<(&'static str, Instant)>,
    failure: Option<Error>,
}

impl TerminalPlatform {
    pub fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            keys: KeyTracker::new(),
            rng: StdRng::from_entropy(),
            epoch: Instant::now(),
            active: false,
            needs_redraw: true,
            note: None,
            failure: None,
        }
    }

    /// Create from environment variables (`STC_KEY_RELEASE_MS`).
    pub fn from_env() -> Self {
        use std::env;

        let timeout_ms = env::var("STC_KEY_RELEASE_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_KEY_RELEASE_TIMEOUT_MS);

        let mut platform = Self::new();
        platform.keys = KeyTracker::new()
            .with_key_release_timeout(Some(Duration::from_millis(timeout_ms)));
        platform
    }

    /// Terminal I/O failure seen during play, if any.
    pub fn take_failure(&mut self) -> Option<Error> {
        self.failure.take()
    }

    fn fail(&mut self, err: Error) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    fn poll_terminal(&mut self, input: &mut InputBuffer) -> std::io::Result<()> {
        while !input.is_full() && event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.keys.on_key(key, Instant::now(), input),
                Event::Resize(..) => self.needs_redraw = true,
                Event::FocusLost => self.keys.release_all(input),
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for TerminalPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for TerminalPlatform {
    fn init(&mut self) -> Result<(), GameError> {
        if let Err(err) = self.renderer.enter() {
            // Leave the terminal usable even when entering failed halfway.
            if let Err(exit_err) = self.renderer.exit() {
                eprintln!("[Term] failed to restore terminal: {exit_err:#}");
            }
            return Err(GameError::new(ErrorCode::NoVideo, format!("{err:#}")));
        }
        if self.renderer.key_release_events() {
            self.keys = self.keys.clone().with_key_release_timeout(None);
        }
        self.active = true;
        self.needs_redraw = true;
        Ok(())
    }

    fn end(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Err(err) = self.renderer.exit() {
            eprintln!("[Term] failed to restore terminal: {err:#}");
        }
    }

    fn process_events(&mut self, input: &mut InputBuffer) {
        if self.failure.is_none() {
            match self.poll_terminal(input) {
                Ok(()) => {
                    self.keys.expire(Instant::now(), input);
                    return;
                }
                Err(err) => self.fail(err.into()),
            }
        }

        // Quit must reach the game; it replaces the newest edge when the buffer is full.
        if input.is_full() {
            input.pop();
        }
        input.push(InputEvent::start(GameEvent::Quit));
    }

    fn render_game(&mut self, frame: &GameSnapshot) {
        if let Some((_, shown_at)) = self.note {
            if shown_at.elapsed() >= NOTE_DURATION {
                self.note = None;
                self.needs_redraw = true;
            }
        }
        if !(frame.state_changed || self.needs_redraw) {
            return;
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let note = self.note.map(|(text, _)| text);
        self.view
            .render_into_with_note(frame, note, Viewport::new(w, h), &mut self.fb);
        match self.renderer.draw(&self.fb) {
            Ok(()) => self.needs_redraw = false,
            Err(err) => self.fail(err),
        }
    }

    fn system_time(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn random(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn on_line_completed(&mut self) {
        self.note = Some(("LINE CLEAR", Instant::now()));
        self.needs_redraw = true;
    }
}
