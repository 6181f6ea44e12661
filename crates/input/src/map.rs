//! Key bindings from terminal key codes to engine actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

use crate::types::Action;

/// Key code to action table. Several keys may drive one action; character
/// keys match regardless of case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    entries: Vec<(KeyCode, Action)>,
}

impl KeyBindings {
    /// No keys bound.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind `code` to `action`, replacing any previous binding of `code`.
    pub fn bind(&mut self, code: KeyCode, action: Action) -> &mut Self {
        let code = normalize(code);
        self.entries.retain(|(bound, _)| *bound != code);
        self.entries.push((code, action));
        self
    }

    /// Remove every key bound to `action`.
    pub fn unbind(&mut self, action: Action) -> &mut Self {
        self.entries.retain(|(_, bound)| *bound != action);
        self
    }

    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        let code = normalize(code);
        self.entries
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, action)| *action)
    }

    /// Keys bound to `action`, in binding order.
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = KeyCode> + '_ {
        self.entries
            .iter()
            .filter(move |(_, bound)| *bound == action)
            .map(|(code, _)| *code)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings
            .bind(KeyCode::Left, Action::MoveLeft)
            .bind(KeyCode::Right, Action::MoveRight)
            .bind(KeyCode::Down, Action::SoftDropPrimary)
            .bind(KeyCode::Up, Action::SoftDropSecondary)
            .bind(KeyCode::Char(' '), Action::HardDrop)
            .bind(KeyCode::Modifier(ModifierKeyCode::LeftShift), Action::Hold)
            .bind(KeyCode::Char('c'), Action::Hold)
            .bind(KeyCode::Char('x'), Action::RotateCw)
            .bind(KeyCode::Char('z'), Action::RotateCcw)
            .bind(KeyCode::Char('a'), Action::Rotate180Cw)
            .bind(KeyCode::Char('s'), Action::Rotate180Ccw)
            .bind(KeyCode::Char('r'), Action::Restart);
        bindings
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
