//! Press/release edge tracking for terminal environments.
//!
//! The game needs a release edge to stop autoshift. Terminals with keyboard
//! enhancement report releases; most others only send a press (plus OS key
//! repeats). For those the tracker synthesizes a release once no press of a
//! held command arrived for `key_release_timeout`.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{GameEvent, InputEvent};

// Matches the autorepeat cadence of common terminals closely enough that a held
// key stays held, while a single tap stops repeating quickly.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Commands that stay held between a press and a release.
const HELD: [GameEvent; 4] = [
    GameEvent::MoveLeft,
    GameEvent::MoveRight,
    GameEvent::MoveDown,
    GameEvent::RotateCw,
];

fn held_slot(event: GameEvent) -> Option<usize> {
    HELD.iter().position(|&e| e == event)
}

/// Turns raw key events into start/end command edges.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Time of the last press per held command, `None` when released.
    last_press: [Option<Instant>; HELD.len()],
    /// Release seen while `out` was full; its end edge is still owed.
    release_pending: [bool; HELD.len()],
    key_release_timeout: Option<Duration>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            last_press: [None; HELD.len()],
            release_pending: [false; HELD.len()],
            key_release_timeout: Some(Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS)),
        }
    }

    /// `None` disables synthesized releases (the terminal reports real ones).
    pub fn with_key_release_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.key_release_timeout = timeout;
        self
    }

    pub fn is_held(&self, event: GameEvent) -> bool {
        held_slot(event).is_some_and(|slot| self.last_press[slot].is_some())
    }

    /// Feed one key event.
    ///
    /// One-shot edges that do not fit in `out` are dropped. Held commands only
    /// change state when their edge fits, so a full buffer delays a release to
    /// a later call instead of losing it.
    pub fn on_key<const N: usize>(
        &mut self,
        key: KeyEvent,
        now: Instant,
        out: &mut ArrayVec<InputEvent, N>,
    ) {
        let Some(event) = map_key(key) else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(event, now, out),
            KeyEventKind::Release => self.release(event, out),
        }
    }

    fn press<const N: usize>(
        &mut self,
        event: GameEvent,
        now: Instant,
        out: &mut ArrayVec<InputEvent, N>,
    ) {
        let Some(slot) = held_slot(event) else {
            // One-shot command: the release follows immediately.
            let _ = out.try_push(InputEvent::start(event));
            let _ = out.try_push(InputEvent::end(event));
            return;
        };

        // Horizontal directions are exclusive.
        let opposite = match event {
            GameEvent::MoveLeft => Some(GameEvent::MoveRight),
            GameEvent::MoveRight => Some(GameEvent::MoveLeft),
            _ => None,
        };
        if let Some(opposite) = opposite {
            self.release(opposite, out);
        }

        // A hold only starts once its start edge is queued.
        match self.last_press[slot] {
            Some(_) => {
                self.last_press[slot] = Some(now);
                self.release_pending[slot] = false;
            }
            None => {
                if out.try_push(InputEvent::start(event)).is_ok() {
                    self.last_press[slot] = Some(now);
                }
            }
        }
    }

    fn release<const N: usize>(&mut self, event: GameEvent, out: &mut ArrayVec<InputEvent, N>) {
        if let Some(slot) = held_slot(event) {
            if self.last_press[slot].is_some() {
                self.end_hold(slot, out);
            }
        }
    }

    /// Push the end edge of `slot`; the command stays held until it fits.
    fn end_hold<const N: usize>(&mut self, slot: usize, out: &mut ArrayVec<InputEvent, N>) {
        if out.try_push(InputEvent::end(HELD[slot])).is_ok() {
            self.last_press[slot] = None;
            self.release_pending[slot] = false;
        } else {
            self.release_pending[slot] = true;
        }
    }

    /// Emit releases still owed from a full buffer, then release held commands
    /// whose last press is older than the timeout. Call once per tick.
    pub fn expire<const N: usize>(&mut self, now: Instant, out: &mut ArrayVec<InputEvent, N>) {
        for slot in 0..HELD.len() {
            if self.release_pending[slot] {
                self.end_hold(slot, out);
            }
        }

        let Some(timeout) = self.key_release_timeout else {
            return;
        };
        for slot in 0..HELD.len() {
            let stale = self.last_press[slot]
                .is_some_and(|at| now.saturating_duration_since(at) > timeout);
            if stale {
                self.end_hold(slot, out);
            }
        }
    }

    /// Release everything, e.g. when the terminal loses focus.
    pub fn release_all<const N: usize>(&mut self, out: &mut ArrayVec<InputEvent, N>) {
        for event in HELD {
            self.release(event, out);
        }
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    type Edges = ArrayVec<InputEvent, 16>;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn repeated_presses_keep_one_start() {
        let mut tracker = KeyTracker::new();
        let t0 = Instant::now();
        let mut out = Edges::new();

        tracker.on_key(key(KeyCode::Left, KeyEventKind::Press), t0, &mut out);
        tracker.on_key(
            key(KeyCode::Left, KeyEventKind::Press),
            t0 + Duration::from_millis(30),
            &mut out,
        );

        assert_eq!(out.as_slice(), &[InputEvent::start(GameEvent::MoveLeft)]);
        assert!(tracker.is_held(GameEvent::MoveLeft));
    }

    #[test]
    fn timeout_synthesizes_release() {
        let mut tracker = KeyTracker::new();
        let t0 = Instant::now();
        let mut out = Edges::new();

        tracker.on_key(key(KeyCode::Down, KeyEventKind::Press), t0, &mut out);
        out.clear();

        tracker.expire(t0 + Duration::from_millis(100), &mut out);
        assert!(out.is_empty());

        tracker.expire(t0 + Duration::from_millis(151), &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::end(GameEvent::MoveDown)]);
        assert!(!tracker.is_held(GameEvent::MoveDown));
    }

    #[test]
    fn no_timeout_waits_for_real_release() {
        let mut tracker = KeyTracker::new().with_key_release_timeout(None);
        let t0 = Instant::now();
        let mut out = Edges::new();

        tracker.on_key(key(KeyCode::Up, KeyEventKind::Press), t0, &mut out);
        tracker.expire(t0 + Duration::from_secs(5), &mut out);
        assert_eq!(out.len(), 1);

        tracker.on_key(key(KeyCode::Up, KeyEventKind::Release), t0, &mut out);
        assert_eq!(out[1], InputEvent::end(GameEvent::RotateCw));
    }

    #[test]
    fn one_shot_commands_emit_both_edges() {
        let mut tracker = KeyTracker::new();
        let mut out = Edges::new();

        tracker.on_key(key(KeyCode::Char(' '), KeyEventKind::Press), Instant::now(), &mut out);
        assert_eq!(
            out.as_slice(),
            &[
                InputEvent::start(GameEvent::Drop),
                InputEvent::end(GameEvent::Drop)
            ]
        );
    }

    #[test]
    fn switching_direction_releases_the_other() {
        let mut tracker = KeyTracker::new();
        let t0 = Instant::now();
        let mut out = Edges::new();

        tracker.on_key(key(KeyCode::Left, KeyEventKind::Press), t0, &mut out);
        tracker.on_key(key(KeyCode::Right, KeyEventKind::Press), t0, &mut out);

        assert_eq!(
            out.as_slice(),
            &[
                InputEvent::start(GameEvent::MoveLeft),
                InputEvent::end(GameEvent::MoveLeft),
                InputEvent::start(GameEvent::MoveRight),
            ]
        );
    }

    #[test]
    fn expired_release_waits_for_room() {
        let mut tracker = KeyTracker::new();
        let t0 = Instant::now();
        let mut out: ArrayVec<InputEvent, 2> = ArrayVec::new();

        tracker.on_key(key(KeyCode::Left, KeyEventKind::Press), t0, &mut out);
        out.clear();
        tracker.on_key(key(KeyCode::Char(' '), KeyEventKind::Press), t0, &mut out);
        assert!(out.is_full());

        let later = t0 + Duration::from_millis(500);
        tracker.expire(later, &mut out);
        assert!(tracker.is_held(GameEvent::MoveLeft));

        out.clear();
        tracker.expire(later, &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::end(GameEvent::MoveLeft)]);
        assert!(!tracker.is_held(GameEvent::MoveLeft));
    }

    #[test]
    fn real_release_is_retried_without_timeout() {
        let mut tracker = KeyTracker::new().with_key_release_timeout(None);
        let t0 = Instant::now();
        let mut out: ArrayVec<InputEvent, 1> = ArrayVec::new();

        tracker.on_key(key(KeyCode::Down, KeyEventKind::Press), t0, &mut out);
        tracker.on_key(key(KeyCode::Down, KeyEventKind::Release), t0, &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::start(GameEvent::MoveDown)]);
        assert!(tracker.is_held(GameEvent::MoveDown));

        out.clear();
        tracker.expire(t0, &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::end(GameEvent::MoveDown)]);
        assert!(!tracker.is_held(GameEvent::MoveDown));

        out.clear();
        tracker.expire(t0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn start_is_not_lost_to_a_full_buffer() {
        let mut tracker = KeyTracker::new();
        let t0 = Instant::now();
        let mut full: ArrayVec<InputEvent, 0> = ArrayVec::new();
        let mut out = Edges::new();

        tracker.on_key(key(KeyCode::Right, KeyEventKind::Press), t0, &mut full);
        assert!(!tracker.is_held(GameEvent::MoveRight));

        tracker.on_key(key(KeyCode::Right, KeyEventKind::Repeat), t0, &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::start(GameEvent::MoveRight)]);
    }
}
