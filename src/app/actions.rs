//! User action handling

use crate::models::{HitRegion, KeyPress, NodeId};

/// User-initiated actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    // Tree keyboard input
    Navigate(KeyPress),

    // Editing
    Rename,
    NewChild,
    NewSibling,
    Delete,
    DisableItem,
    EnableAll,

    // General
    SwitchPane,
    ToggleDirection,
    Help,
    Quit,
}

/// Kind of pointer press, after double-click detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// A pointer press resolved against the rendered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerHit {
    pub id: NodeId,
    pub region: HitRegion,
    pub kind: ClickKind,
}

/// Result of processing a user action
#[derive(Debug, PartialEq, Eq)]
pub enum ActionResult {
    Continue,
    Quit,
}
