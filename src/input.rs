use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::life::{Command, Direction};

/// Anything that can hand the session loop one command at a time.
pub trait InputSource {
    /// Wait up to `timeout` for the next command. `Ok(None)` means nothing arrived.
    fn next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Map a key press to a board command. Keys without a meaning yield `None`.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let cmd = match key.code {
        KeyCode::Up => Command::MoveCursor(Direction::Up),
        KeyCode::Down => Command::MoveCursor(Direction::Down),
        KeyCode::Left => Command::MoveCursor(Direction::Left),
        KeyCode::Right => Command::MoveCursor(Direction::Right),
        KeyCode::Char(' ') | KeyCode::End => Command::ToggleCell,
        KeyCode::Enter => Command::Confirm,
        KeyCode::Esc => Command::Cancel,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'r' => Command::RandomFill,
            'c' => Command::Clear,
            'a' => Command::ToggleAutoAnimation,
            'e' => Command::Edit,
            'q' => Command::Exit,
            _ => return None,
        },
        _ => return None,
    };
    Some(cmd)
}

/// Map a raw terminal event. Resizes become `ResizeConsole`.
pub fn map_event(event: Event) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(_, _) => Some(Command::ResizeConsole),
        _ => None,
    }
}

/// Reads commands from the terminal through crossterm.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(map_event(event::read()?))
    }
}

/// Replays a fixed list of commands, then reports `Exit` forever.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Option<Command>>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        ScriptedInput {
            queue: commands.into_iter().map(Some).collect(),
        }
    }

    /// Queue an empty poll, i.e. a loop turn with no input.
    pub fn idle(mut self, turns: usize) -> Self {
        self.queue.extend(std::iter::repeat_n(None, turns));
        self
    }

    pub fn then(mut self, command: Command) -> Self {
        self.queue.push_back(Some(command));
        self
    }
}

impl InputSource for ScriptedInput {
    fn next_command(&mut self, _timeout: Duration) -> io::Result<Option<Command>> {
        Ok(self.queue.pop_front().unwrap_or(Some(Command::Exit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_move_cursor() {
        assert_eq!(
            map_key(key(KeyCode::Left)),
            Some(Command::MoveCursor(Direction::Left))
        );
        assert_eq!(
            map_key(key(KeyCode::Down)),
            Some(Command::MoveCursor(Direction::Down))
        );
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(map_key(key(KeyCode::End)), Some(Command::ToggleCell));
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(Command::ToggleCell));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Command::Confirm));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Command::Cancel));
        assert_eq!(map_key(key(KeyCode::Char('R'))), Some(Command::RandomFill));
        assert_eq!(map_key(key(KeyCode::Char('c'))), Some(Command::Clear));
        assert_eq!(
            map_key(key(KeyCode::Char('a'))),
            Some(Command::ToggleAutoAnimation)
        );
        assert_eq!(map_key(key(KeyCode::Char('e'))), Some(Command::Edit));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Command::Exit));
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(key(KeyCode::Tab)), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut k = key(KeyCode::Enter);
        k.kind = KeyEventKind::Release;
        assert_eq!(map_key(k), None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(map_event(Event::Resize(80, 24)), Some(Command::ResizeConsole));
        assert_eq!(map_event(Event::FocusGained), None);
    }

    #[test]
    fn test_scripted_input_ends_with_exit() {
        let mut input = ScriptedInput::new([Command::Confirm]).idle(1);
        let t = Duration::ZERO;
        assert_eq!(input.next_command(t).unwrap(), Some(Command::Confirm));
        assert_eq!(input.next_command(t).unwrap(), None);
        assert_eq!(input.next_command(t).unwrap(), Some(Command::Exit));
        assert_eq!(input.next_command(t).unwrap(), Some(Command::Exit));
    }
}
