//! Key mapping from terminal events to game commands.

use crate::types::{Command, Status};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a game command.
///
/// Enter depends on `status`: it starts a session from `GameOver` and toggles
/// pause otherwise. Releases and auto-repeats are ignored.
pub fn handle_key_event(key: KeyEvent, status: Status) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Enter => match status {
            Status::GameOver => Some(Command::Start),
            _ => Some(Command::TogglePause),
        },
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),

        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::MoveRight)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('z')
        | KeyCode::Char('Z') => Some(Command::RotateCcw),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Command::RotateCw),

        KeyCode::Char(' ') => Some(Command::HardDrop),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        || matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}
