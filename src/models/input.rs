//! Input vocabulary understood by the tree

use serde::{Deserialize, Serialize};

/// Reading direction; swaps the meaning of the horizontal arrows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ltr => Self::Rtl,
            Self::Rtl => Self::Ltr,
        }
    }
}

/// Keys the tree reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Space,
}

/// A key press as seen by the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: NavKey,
    /// Generated by key auto-repeat
    pub repeat: bool,
    /// Control held
    pub ctrl: bool,
}

impl KeyPress {
    pub fn new(key: NavKey) -> Self {
        Self {
            key,
            repeat: false,
            ctrl: false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Map the horizontal arrows onto their left-to-right meaning.
    pub(crate) fn logical_key(&self, direction: Direction) -> NavKey {
        match (direction, self.key) {
            (Direction::Rtl, NavKey::Left) => NavKey::Right,
            (Direction::Rtl, NavKey::Right) => NavKey::Left,
            (_, key) => key,
        }
    }
}

/// Visual part of a row that received a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    ExpandGlyph,
    Row,
    RenameInput,
}
