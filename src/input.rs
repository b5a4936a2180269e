//! Key bindings and terminal input.

use crate::actions::{Action, Offset};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind};
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

/// Key identifier -> action. Lookups are exact and case-sensitive.
static KEY_BINDINGS: LazyLock<HashMap<&'static str, Action>> = LazyLock::new(|| {
    HashMap::from([
        ("ArrowUp", Action::Bump(Offset::NORTH)),
        ("ArrowDown", Action::Bump(Offset::SOUTH)),
        ("ArrowLeft", Action::Bump(Offset::WEST)),
        ("ArrowRight", Action::Bump(Offset::EAST)),
        // WASD
        ("w", Action::Bump(Offset::NORTH)),
        ("s", Action::Bump(Offset::SOUTH)),
        ("a", Action::Bump(Offset::WEST)),
        ("d", Action::Bump(Offset::EAST)),
        ("q", Action::Bump(Offset::NORTH_WEST)),
        ("e", Action::Bump(Offset::NORTH_EAST)),
        ("z", Action::Bump(Offset::SOUTH_WEST)),
        ("c", Action::Bump(Offset::SOUTH_EAST)),
        ("x", Action::Wait),
    ])
});

/// Look up the action bound to `key`. `None` means nothing happens this tick.
pub fn handle_input(key: &str) -> Option<Action> {
    KEY_BINDINGS.get(key).copied()
}

pub fn key_bindings() -> impl Iterator<Item = (&'static str, Action)> {
    KEY_BINDINGS.iter().map(|(key, action)| (*key, *action))
}

/// Name a crossterm key press the way the bindings table does.
///
/// Arrow keys become `ArrowUp` and friends, characters become themselves. A held key keeps
/// acting through its repeats, while releases yield `None`.
pub fn key_identifier(key: &KeyEvent) -> Option<String> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Up => Some("ArrowUp".to_string()),
        KeyCode::Down => Some("ArrowDown".to_string()),
        KeyCode::Left => Some("ArrowLeft".to_string()),
        KeyCode::Right => Some("ArrowRight".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

pub fn handle_key_event(key: &KeyEvent) -> Option<Action> {
    key_identifier(key).and_then(|id| handle_input(&id))
}

/// Trait for input sources
pub trait InputSource {
    type Event;

    /// Poll for input events with a timeout
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<Self::Event>>;
}

/// Reads key events from the terminal
#[derive(Default)]
pub struct ConsoleInput;

impl ConsoleInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for ConsoleInput {
    type Event = KeyEvent;

    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<Self::Event>> {
        if event::poll(timeout)? {
            if let CEvent::Key(key_event) = event::read()? {
                return Ok(Some(key_event));
            }
        }
        Ok(None)
    }
}
