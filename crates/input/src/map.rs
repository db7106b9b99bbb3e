//! Key mapping from terminal events to game commands.

use crate::types::GameEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game command.
pub fn map_key(key: KeyEvent) -> Option<GameEvent> {
    if should_quit(key) {
        return Some(GameEvent::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameEvent::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameEvent::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameEvent::MoveDown)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameEvent::RotateCw),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(GameEvent::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(GameEvent::Drop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameEvent::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameEvent::Restart),

        // Display toggles
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameEvent::ShowNext),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(GameEvent::ShowShadow),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(GameEvent::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(GameEvent::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(GameEvent::MoveDown));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('H'))), Some(GameEvent::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('d'))), Some(GameEvent::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('J'))), Some(GameEvent::MoveDown));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(GameEvent::RotateCw));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('W'))), Some(GameEvent::RotateCw));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('z'))), Some(GameEvent::RotateCcw));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('Y'))), Some(GameEvent::RotateCcw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(GameEvent::Drop));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('p'))), Some(GameEvent::Pause));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('R'))), Some(GameEvent::Restart));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('n'))), Some(GameEvent::ShowNext));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('g'))), Some(GameEvent::ShowShadow));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('Q'))), Some(GameEvent::Quit));
    }
}
