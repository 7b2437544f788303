//! Tree item model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an item inside a [`TreeContainer`](super::TreeContainer).
///
/// Ids are never reused, so an id that outlives its item simply stops
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rename editing sub-state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenameState {
    #[default]
    Idle,
    Editing,
}

/// A single navigable node
#[derive(Debug, Clone)]
pub struct TreeItem {
    pub label: String,
    pub icon: Option<String>,
    pub separator: bool,
    pub error: bool,
    pub may_have_children: bool,

    pub(crate) disabled: bool,
    pub(crate) active: bool,
    pub(crate) expanded: bool,
    pub(crate) rename: RenameState,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl TreeItem {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: None,
            separator: false,
            error: false,
            may_have_children: false,
            disabled: false,
            active: false,
            expanded: false,
            rename: RenameState::Idle,
            depth: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_separator(mut self) -> Self {
        self.separator = true;
        self
    }

    pub fn with_error(mut self) -> Self {
        self.error = true;
        self
    }

    pub fn with_may_have_children(mut self) -> Self {
        self.may_have_children = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Request expansion once the item has children.
    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Expansion as it is observed; always false for items that cannot
    /// have children.
    pub fn is_expanded(&self) -> bool {
        self.expanded && self.has_children()
    }

    pub fn is_editing(&self) -> bool {
        self.rename == RenameState::Editing
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        self.may_have_children || !self.children.is_empty()
    }

    pub fn is_selectable(&self) -> bool {
        !self.disabled
    }

    /// Returns true when the flag actually changed.
    pub(crate) fn set_expanded(&mut self, expanded: bool) -> bool {
        if !self.has_children() || self.expanded == expanded {
            return false;
        }
        self.expanded = expanded;
        true
    }

    /// A disabled item refuses to become active. Returns true when the flag
    /// actually changed.
    pub(crate) fn set_active(&mut self, active: bool) -> bool {
        if active && self.disabled {
            return false;
        }
        if self.active == active {
            return false;
        }
        self.active = active;
        true
    }

    /// Returns true when the flag actually changed. Disabling also clears
    /// the active flag.
    pub(crate) fn set_disabled(&mut self, disabled: bool) -> bool {
        if self.disabled == disabled {
            return false;
        }
        self.disabled = disabled;
        if disabled {
            self.active = false;
        }
        true
    }

    pub(crate) fn begin_rename(&mut self) -> bool {
        if self.rename == RenameState::Editing {
            return false;
        }
        self.rename = RenameState::Editing;
        true
    }

    /// Leaves editing mode and applies `new_label` when it is non-blank and
    /// different. Returns the previous label when a rename took place.
    pub(crate) fn commit_rename(&mut self, new_label: &str) -> Option<String> {
        if self.rename != RenameState::Editing {
            return None;
        }
        self.rename = RenameState::Idle;
        if new_label.trim().is_empty() || new_label == self.label {
            return None;
        }
        Some(std::mem::replace(&mut self.label, new_label.to_string()))
    }

    pub(crate) fn cancel_rename(&mut self) -> bool {
        if self.rename != RenameState::Editing {
            return false;
        }
        self.rename = RenameState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_ignores_expansion() {
        let mut item = TreeItem::new("leaf");
        assert!(!item.set_expanded(true));
        assert!(!item.is_expanded());
    }

    #[test]
    fn lazy_item_can_expand_without_children() {
        let mut item = TreeItem::new("lazy").with_may_have_children();
        assert!(item.set_expanded(true));
        assert!(item.is_expanded());
        assert!(!item.set_expanded(true));
    }

    #[test]
    fn disabled_item_rejects_activation() {
        let mut item = TreeItem::new("x").disabled();
        assert!(!item.set_active(true));
        assert!(!item.is_active());
    }

    #[test]
    fn disabling_clears_active() {
        let mut item = TreeItem::new("x");
        item.set_active(true);
        assert!(item.set_disabled(true));
        assert!(!item.is_active());
    }

    #[test]
    fn rename_discards_blank_and_unchanged() {
        let mut item = TreeItem::new("Inbox");
        item.begin_rename();
        assert_eq!(item.commit_rename("   "), None);
        assert!(!item.is_editing());

        item.begin_rename();
        assert_eq!(item.commit_rename("Inbox"), None);
        assert_eq!(item.label, "Inbox");

        item.begin_rename();
        assert_eq!(item.commit_rename("Archive"), Some("Inbox".to_string()));
        assert_eq!(item.label, "Archive");
    }

    #[test]
    fn commit_without_editing_is_ignored() {
        let mut item = TreeItem::new("Inbox");
        assert_eq!(item.commit_rename("Other"), None);
        assert_eq!(item.label, "Inbox");
    }

    #[test]
    fn cancel_blocks_later_commit() {
        let mut item = TreeItem::new("Inbox");
        item.begin_rename();
        assert!(item.cancel_rename());
        assert_eq!(item.commit_rename("Other"), None);
        assert_eq!(item.label, "Inbox");
    }
}
