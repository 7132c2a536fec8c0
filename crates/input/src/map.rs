//! Key bindings: which keys trigger which action, and how they are described
//! in the help panel.

use crate::types::{Direction, Key, NimAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One entry of the key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub keys: &'static [Key],
    /// Short key label shown in help, e.g. `↑/k`
    pub help_key: &'static str,
    pub help_desc: &'static str,
    pub action: NimAction,
}

impl Binding {
    pub fn matches(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

pub const UP: Binding = Binding {
    keys: &[Key::Up, Key::Char('k')],
    help_key: "↑/k",
    help_desc: "move up",
    action: NimAction::Move(Direction::Up),
};

pub const DOWN: Binding = Binding {
    keys: &[Key::Down, Key::Char('j')],
    help_key: "↓/j",
    help_desc: "move down",
    action: NimAction::Move(Direction::Down),
};

pub const LEFT: Binding = Binding {
    keys: &[Key::Left, Key::Char('h')],
    help_key: "←/h",
    help_desc: "move left",
    action: NimAction::Move(Direction::Left),
};

pub const RIGHT: Binding = Binding {
    keys: &[Key::Right, Key::Char('l')],
    help_key: "→/l",
    help_desc: "move right",
    action: NimAction::Move(Direction::Right),
};

pub const HELP: Binding = Binding {
    keys: &[Key::Char('?')],
    help_key: "?",
    help_desc: "toggle help",
    action: NimAction::ToggleHelp,
};

pub const QUIT: Binding = Binding {
    keys: &[Key::Char('q'), Key::Esc, Key::Interrupt],
    help_key: "q",
    help_desc: "quit",
    action: NimAction::Quit,
};

pub const SUBMIT: Binding = Binding {
    keys: &[Key::Enter],
    help_key: "ENTER",
    help_desc: "submit",
    action: NimAction::Submit,
};

pub const SELECT: Binding = Binding {
    keys: &[Key::Char(' ')],
    help_key: "SPACE",
    help_desc: "select",
    action: NimAction::Select,
};

/// Match order. Quit comes first so it always wins.
const ALL: [Binding; 8] = [QUIT, SUBMIT, SELECT, DOWN, UP, RIGHT, LEFT, HELP];

/// Bindings listed in the compact help line.
pub const SHORT_HELP: [Binding; 2] = [HELP, QUIT];

/// Columns of the expanded help panel.
pub const FULL_HELP: [[Binding; 4]; 2] = [[UP, DOWN, LEFT, RIGHT], [SELECT, SUBMIT, HELP, QUIT]];

/// Map a key to the action bound to it.
pub fn action_for_key(key: Key) -> Option<NimAction> {
    ALL.iter().find(|b| b.matches(key)).map(|b| b.action)
}

/// Translate a crossterm key event into a transport-agnostic [`Key`].
pub fn key_from_event(ev: KeyEvent) -> Option<Key> {
    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return match ev.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Key::Interrupt),
            _ => None,
        };
    }
    match ev.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}
