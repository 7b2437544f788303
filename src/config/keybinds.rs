//! Keyboard shortcut definitions

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::actions::UserAction;
use crate::models::{KeyPress, NavKey};

/// Keyboard shortcut configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    // Global
    pub quit: KeyBind,
    pub help: KeyBind,
    pub switch_pane: KeyBind,
    pub toggle_direction: KeyBind,

    // Tree navigation (arrow keys primary, vi alternative)
    pub up: Vec<KeyBind>,
    pub down: Vec<KeyBind>,
    pub left: Vec<KeyBind>,
    pub right: Vec<KeyBind>,
    pub top: Vec<KeyBind>,
    pub bottom: Vec<KeyBind>,
    pub activate: KeyBind,
    pub activate_alt: KeyBind,

    // Editing
    pub rename: KeyBind,
    pub new_child: KeyBind,
    pub new_sibling: KeyBind,
    pub delete: KeyBind,
    pub disable_item: KeyBind,
    pub enable_all: KeyBind,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            // Global
            quit: KeyBind::new(KeyCode::Char('q'), KeyModifiers::NONE),
            help: KeyBind::new(KeyCode::Char('?'), KeyModifiers::NONE),
            switch_pane: KeyBind::new(KeyCode::Tab, KeyModifiers::NONE),
            toggle_direction: KeyBind::new(KeyCode::Char('t'), KeyModifiers::NONE),

            // Tree navigation
            up: vec![
                KeyBind::new(KeyCode::Up, KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('k'), KeyModifiers::NONE),
            ],
            down: vec![
                KeyBind::new(KeyCode::Down, KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('j'), KeyModifiers::NONE),
            ],
            left: vec![
                KeyBind::new(KeyCode::Left, KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('h'), KeyModifiers::NONE),
            ],
            right: vec![
                KeyBind::new(KeyCode::Right, KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('l'), KeyModifiers::NONE),
            ],
            top: vec![
                KeyBind::new(KeyCode::Home, KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('g'), KeyModifiers::NONE),
            ],
            bottom: vec![
                KeyBind::new(KeyCode::End, KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            ],
            activate: KeyBind::new(KeyCode::Enter, KeyModifiers::NONE),
            activate_alt: KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE),

            // Editing
            rename: KeyBind::new(KeyCode::F(2), KeyModifiers::NONE),
            new_child: KeyBind::new(KeyCode::Char('n'), KeyModifiers::NONE),
            new_sibling: KeyBind::new(KeyCode::Char('N'), KeyModifiers::SHIFT),
            delete: KeyBind::new(KeyCode::Delete, KeyModifiers::NONE),
            disable_item: KeyBind::new(KeyCode::Char('x'), KeyModifiers::NONE),
            enable_all: KeyBind::new(KeyCode::Char('X'), KeyModifiers::SHIFT),
        }
    }
}

impl KeyBindings {
    /// Translate a terminal key event. Navigation keys are reported even
    /// with Control held so the tree can reject the chord itself.
    pub fn action_for(&self, event: &KeyEvent) -> Option<UserAction> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let code = event.code;
        let modifiers = event.modifiers;

        if (code, modifiers) == (KeyCode::Char('c'), KeyModifiers::CONTROL) {
            return Some(UserAction::Quit);
        }

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let plain = modifiers.difference(KeyModifiers::CONTROL);
        let nav = [
            (&self.up, NavKey::Up),
            (&self.down, NavKey::Down),
            (&self.left, NavKey::Left),
            (&self.right, NavKey::Right),
            (&self.top, NavKey::Home),
            (&self.bottom, NavKey::End),
        ];
        for (binds, key) in nav {
            if binds.iter().any(|b| b.matches(code, plain)) {
                return Some(UserAction::Navigate(KeyPress {
                    key,
                    repeat: event.kind == KeyEventKind::Repeat,
                    ctrl,
                }));
            }
        }
        for (bind, key) in [(&self.activate, NavKey::Enter), (&self.activate_alt, NavKey::Space)] {
            if bind.matches(code, plain) {
                return Some(UserAction::Navigate(KeyPress {
                    key,
                    repeat: event.kind == KeyEventKind::Repeat,
                    ctrl,
                }));
            }
        }

        let action = if self.quit.matches(code, modifiers) {
            UserAction::Quit
        } else if self.help.matches(code, modifiers) || code == KeyCode::F(1) {
            UserAction::Help
        } else if self.switch_pane.matches(code, modifiers) {
            UserAction::SwitchPane
        } else if self.toggle_direction.matches(code, modifiers) {
            UserAction::ToggleDirection
        } else if self.rename.matches(code, modifiers) {
            UserAction::Rename
        } else if self.new_child.matches(code, modifiers) {
            UserAction::NewChild
        } else if self.new_sibling.matches(code, modifiers) {
            UserAction::NewSibling
        } else if self.delete.matches(code, modifiers) {
            UserAction::Delete
        } else if self.disable_item.matches(code, modifiers) {
            UserAction::DisableItem
        } else if self.enable_all.matches(code, modifiers) {
            UserAction::EnableAll
        } else {
            return None;
        };
        Some(action)
    }
}

/// A single key binding
#[derive(Debug, Clone)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }
}
