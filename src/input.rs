//! Raw keyboard polling. Each tick drains every buffered key event and keeps
//! only the most recent one, so a burst of queued keystrokes collapses to the
//! last direction instead of turning up as a string of delayed moves.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
    Interrupt,
}

/// Non-blocking: returns immediately with `None` when nothing is buffered.
/// Read failures also count as "no key"; input is never fatal.
pub fn poll_command() -> Option<Command> {
    let mut burst = Vec::new();
    while matches!(event::poll(Duration::ZERO), Ok(true)) {
        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => burst.push(key),
            Ok(_) => {}
            Err(_) => break,
        }
    }
    collapse(burst)
}

/// Last key wins, mapped afterwards: a trailing unmapped key deliberately
/// discards earlier mapped ones. Ctrl+C is the exception; it must never be
/// masked by a key queued behind it.
fn collapse(burst: impl IntoIterator<Item = KeyEvent>) -> Option<Command> {
    let mut last = None;
    for key in burst {
        if is_interrupt(&key) {
            return Some(Command::Interrupt);
        }
        last = Some(key);
    }
    last.and_then(map_key)
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Turn(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Turn(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Turn(Direction::Right)),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}
