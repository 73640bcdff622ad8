//! Key mapping from terminal events to intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key event to an intent.
///
/// Presses move and rotate; the down key turns soft drop on when pressed or
/// repeated and off when released. Auto-repeat of the other keys is ignored.
pub fn key_to_intent(key: KeyEvent) -> Option<Intent> {
    match (key.kind, key.code) {
        (KeyEventKind::Press, KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A')) => {
            Some(Intent::MoveLeft)
        }
        (KeyEventKind::Press, KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D')) => {
            Some(Intent::MoveRight)
        }
        (KeyEventKind::Press, KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W')) => {
            Some(Intent::RotateCw)
        }
        (
            KeyEventKind::Press | KeyEventKind::Repeat,
            KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S'),
        ) => Some(Intent::SoftDropOn),
        (KeyEventKind::Release, KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S')) => {
            Some(Intent::SoftDropOff)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && (matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
}

/// Check if key asks for a fresh session after game over.
pub fn is_restart(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('r' | 'R' | 'y' | 'Y'))
}

/// Check if key declines another session at the game-over prompt.
pub fn is_decline(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('n' | 'N'))
}
