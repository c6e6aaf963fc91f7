use std::str::FromStr;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::error;

use crate::error::GameError;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in screen coordinates (y grows downwards).
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(GameError::UnsupportedDirection(other.to_owned())),
        }
    }
}

/// One event of the input alphabet consumed by the session loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Move(Direction),
    Quit,
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "quit" => Ok(Self::Quit),
            other => other.parse().map(Self::Move),
        }
    }
}

/// Maps a key press to a command. Keys outside the alphabet yield `None`.
#[must_use]
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('k' | 'w') => Direction::Up,
        KeyCode::Down | KeyCode::Char('j' | 's') => Direction::Down,
        KeyCode::Left | KeyCode::Char('h' | 'a') => Direction::Left,
        KeyCode::Right | KeyCode::Char('l' | 'd') => Direction::Right,
        KeyCode::Esc | KeyCode::Char('q' | 'c') => return Some(Command::Quit),
        _ => return None,
    };

    Some(Command::Move(direction))
}

/// Blocking keyboard source: each `next()` waits for the next accepted key.
///
/// Requires raw mode. A terminal read error ends the sequence.
#[derive(Debug, Default)]
pub struct KeyboardCommands;

impl KeyboardCommands {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Iterator for KeyboardCommands {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(command) = command_for_key(key) {
                        return Some(command);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!("failed to read terminal event: {e}");
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use crate::error::GameError;

    use super::{command_for_key, Command, Direction};

    #[test]
    fn alphabet_symbols_parse() {
        assert_eq!("left".parse(), Ok(Command::Move(Direction::Left)));
        assert_eq!("right".parse(), Ok(Command::Move(Direction::Right)));
        assert_eq!("up".parse(), Ok(Command::Move(Direction::Up)));
        assert_eq!("down".parse(), Ok(Command::Move(Direction::Down)));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn unknown_symbol_is_unsupported_direction() {
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(GameError::UnsupportedDirection("sideways".to_owned()))
        );
        assert!("quit".parse::<Direction>().is_err());
    }

    #[test]
    fn arrow_keys_map_to_moves() {
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Left)),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Down)),
            Some(Command::Move(Direction::Down))
        );
    }

    #[test]
    fn quit_keys_map_to_quit() {
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(Command::Quit)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char('c'))),
            Some(Command::Quit)
        );
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn other_keys_and_releases_are_ignored() {
        assert_eq!(command_for_key(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(command_for_key(KeyEvent::from(KeyCode::Enter)), None);
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );

        let mut release = KeyEvent::from(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for_key(release), None);
    }
}
