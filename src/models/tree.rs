//! Tree container: owns every item and coordinates selection, focus,
//! expansion and keyboard traversal.
//!
//! Items live in an arena indexed by [`NodeId`]. Parents hold their children
//! as ordered id lists and children point back with a plain id. Structural
//! mutations record what they touched in a [`Repair`] and finish with a
//! single [`TreeContainer::repair_invariants`] pass.

use std::collections::VecDeque;

use super::event::TreeEvent;
use super::input::{Direction, HitRegion, KeyPress, NavKey};
use super::item::{NodeId, TreeItem};

/// One row of the expansion-aware, flattened tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    pub depth: usize,
}

/// Side effects owed after a structural mutation
#[derive(Debug, Default)]
struct Repair {
    /// Parents whose child list became empty
    emptied: Vec<NodeId>,
    /// Set when the active item was removed: (removed active id, its parent)
    lost_active: Option<(NodeId, Option<NodeId>)>,
}

/// Owner of the item arena.
///
/// Removed items leave an empty slot behind; slots are never recycled, so a
/// stale [`NodeId`] can never resolve to a different item.
#[derive(Debug, Default)]
pub struct TreeContainer {
    nodes: Vec<Option<TreeItem>>,
    roots: Vec<NodeId>,
    active_item: Option<NodeId>,
    last_focused: Option<NodeId>,
    renaming: Option<NodeId>,
    direction: Direction,
    events: VecDeque<TreeEvent>,
}

impl TreeContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    // ---- Lookup ----

    pub fn get(&self, id: NodeId) -> Option<&TreeItem> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeItem> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn active_item(&self) -> Option<NodeId> {
        self.active_item
    }

    pub fn last_focused(&self) -> Option<NodeId> {
        self.last_focused
    }

    pub fn editing_item(&self) -> Option<NodeId> {
        self.renaming
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|item| item.label.as_str())
    }

    /// First item in document order carrying `label`
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|id| self.label(*id) == Some(label))
    }

    /// Every live item, depth-first pre-order, ignoring expansion
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(item) = self.get(id) {
                out.push(id);
                stack.extend(item.children.iter().rev().copied());
            }
        }
        out
    }

    /// Rows a reader can currently see: children of collapsed items are
    /// skipped.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(item) = self.get(id) {
                out.push(VisibleRow {
                    id,
                    depth: item.depth,
                });
                if item.is_expanded() {
                    stack.extend(item.children.iter().rev().copied());
                }
            }
        }
        out
    }

    pub fn has_selectable(&self) -> bool {
        self.nodes.iter().flatten().any(TreeItem::is_selectable)
    }

    fn is_selectable(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(TreeItem::is_selectable)
    }

    fn is_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.get(id).and_then(|item| item.parent);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.get(p).and_then(|item| item.parent);
        }
        false
    }

    /// Outbound notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<TreeEvent> {
        self.events.drain(..).collect()
    }

    fn emit(&mut self, event: TreeEvent) {
        tracing::trace!("tree event: {}", event);
        self.events.push_back(event);
    }

    // ---- Structure ----

    /// Insert `item` under `parent` (or at the top level) at `index`,
    /// appending when the index is absent or past the end. Returns `None`
    /// when the parent does not exist.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        index: Option<usize>,
        mut item: TreeItem,
    ) -> Option<NodeId> {
        if let Some(p) = parent {
            if !self.contains(p) {
                return None;
            }
        }

        let id = NodeId::new(self.nodes.len());
        item.parent = parent;
        item.children.clear();
        item.active = false;
        item.rename = Default::default();
        self.nodes.push(Some(item));

        let siblings = match parent {
            Some(p) => &mut self.get_mut(p)?.children,
            None => &mut self.roots,
        };
        let at = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(at, id);

        tracing::debug!("inserted {} under {:?}", id, parent);
        self.repair_invariants(Repair::default());
        Some(id)
    }

    pub fn push(&mut self, parent: Option<NodeId>, item: TreeItem) -> Option<NodeId> {
        self.insert(parent, None, item)
    }

    /// Remove an item together with its subtree. Returns the number of
    /// removed items.
    pub fn remove(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.get(id).map(|item| item.parent) else {
            return 0;
        };

        let mut subtree = vec![id];
        let mut i = 0;
        while i < subtree.len() {
            if let Some(item) = self.get(subtree[i]) {
                subtree.extend(item.children.iter().copied());
            }
            i += 1;
        }

        let mut repair = Repair::default();
        match parent {
            Some(p) => {
                if let Some(parent_item) = self.get_mut(p) {
                    parent_item.children.retain(|c| *c != id);
                    if parent_item.children.is_empty() {
                        repair.emptied.push(p);
                    }
                }
            }
            None => self.roots.retain(|c| *c != id),
        }

        if let Some(active) = self.active_item {
            if subtree.contains(&active) {
                self.active_item = None;
                repair.lost_active = Some((active, parent));
            }
        }
        if let Some(focused) = self.last_focused {
            if subtree.contains(&focused) {
                self.last_focused = parent.filter(|p| self.is_selectable(*p));
            }
        }
        for removed in &subtree {
            self.nodes[removed.index()] = None;
        }

        tracing::debug!("removed {} ({} items)", id, subtree.len());
        self.repair_invariants(repair);
        subtree.len()
    }

    /// Single post-mutation pass restoring every structural invariant.
    fn repair_invariants(&mut self, repair: Repair) {
        // Emptied parents collapse.
        for p in repair.emptied {
            if let Some(item) = self.get_mut(p) {
                if item.expanded {
                    item.expanded = false;
                    self.emit(TreeEvent::Collapsed { id: p });
                }
            }
        }

        // The parent of a removed active item takes over.
        if let Some((previous, parent)) = repair.lost_active {
            let current = parent.filter(|p| self.is_selectable(*p));
            if let Some(p) = current {
                if let Some(item) = self.get_mut(p) {
                    item.set_active(true);
                }
                self.active_item = Some(p);
                self.emit(TreeEvent::ItemActiveChanged { id: p, active: true });
            }
            self.emit(TreeEvent::ActiveChanged {
                previous: Some(previous),
                current,
            });
        }

        // Depths follow the parent chain.
        let mut stack: Vec<(NodeId, usize)> = self.roots.iter().map(|r| (*r, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            if let Some(item) = self.get_mut(id) {
                item.depth = depth;
                let children = item.children.clone();
                stack.extend(children.into_iter().map(|c| (c, depth + 1)));
            }
        }

        // No dangling references.
        if self
            .active_item
            .is_some_and(|a| !self.get(a).is_some_and(TreeItem::is_active))
        {
            self.active_item = None;
        }
        if self.last_focused.is_some_and(|f| !self.is_selectable(f)) {
            self.last_focused = None;
        }
        if self
            .renaming
            .is_some_and(|r| !self.get(r).is_some_and(TreeItem::is_editing))
        {
            self.renaming = None;
        }

        debug_assert!(self.nodes.iter().flatten().filter(|n| n.active).count() <= 1);
    }

    // ---- Expansion ----

    /// Returns true when the expansion state changed.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        if !item.set_expanded(expanded) {
            return false;
        }

        if expanded {
            self.emit(TreeEvent::Expanded { id });
        } else {
            // Focus must not stay inside a hidden subtree.
            if self.last_focused.is_some_and(|f| self.is_descendant(f, id)) {
                self.last_focused = Some(id).filter(|id| self.is_selectable(*id));
            }
            self.emit(TreeEvent::Collapsed { id });
        }
        tracing::debug!("{} expanded = {}", id, expanded);
        true
    }

    pub fn toggle_expanded(&mut self, id: NodeId) -> bool {
        match self.get(id) {
            Some(item) => {
                let expanded = item.is_expanded();
                self.set_expanded(id, !expanded)
            }
            None => false,
        }
    }

    /// Expand every ancestor of `id`.
    pub fn reveal(&mut self, id: NodeId) {
        let mut cursor = self.get(id).and_then(|item| item.parent);
        while let Some(p) = cursor {
            self.set_expanded(p, true);
            cursor = self.get(p).and_then(|item| item.parent);
        }
    }

    // ---- Selection ----

    /// Make `id` the single active item. Disabled or unknown items are
    /// ignored. Returns true when the active item changed.
    pub fn activate(&mut self, id: NodeId) -> bool {
        if !self.is_selectable(id) {
            return false;
        }
        self.last_focused = Some(id);

        let previous = self.active_item;
        if previous == Some(id) {
            return false;
        }

        if let Some(prev) = previous {
            if let Some(item) = self.get_mut(prev) {
                if item.set_active(false) {
                    self.emit(TreeEvent::ItemActiveChanged {
                        id: prev,
                        active: false,
                    });
                }
            }
        }
        if let Some(item) = self.get_mut(id) {
            item.set_active(true);
        }
        self.active_item = Some(id);
        self.emit(TreeEvent::ItemActiveChanged { id, active: true });
        self.emit(TreeEvent::ActiveChanged {
            previous,
            current: Some(id),
        });
        tracing::debug!("active {:?} -> {}", previous, id);
        true
    }

    /// Clear the active flag of `id` if it holds it.
    pub fn deactivate(&mut self, id: NodeId) -> bool {
        if self.active_item != Some(id) {
            return false;
        }
        if let Some(item) = self.get_mut(id) {
            item.set_active(false);
        }
        self.active_item = None;
        self.emit(TreeEvent::ItemActiveChanged { id, active: false });
        self.emit(TreeEvent::ActiveChanged {
            previous: Some(id),
            current: None,
        });
        true
    }

    /// Item-level active flag routed through the container so the single
    /// active invariant holds.
    pub fn set_item_active(&mut self, id: NodeId, active: bool) -> bool {
        if active {
            self.activate(id)
        } else {
            self.deactivate(id)
        }
    }

    /// Returns true when the flag changed. Disabling the active item leaves
    /// the tree without an active item.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        let was_active = item.active;
        let was_editing = item.is_editing();
        if !item.set_disabled(disabled) {
            return false;
        }
        if disabled && was_editing {
            item.cancel_rename();
        }

        self.emit(TreeEvent::DisabledChanged { id, disabled });
        if disabled {
            if was_active {
                self.active_item = None;
                self.emit(TreeEvent::ItemActiveChanged { id, active: false });
                self.emit(TreeEvent::ActiveChanged {
                    previous: Some(id),
                    current: None,
                });
            }
            if self.last_focused == Some(id) {
                self.last_focused = None;
            }
            if self.renaming == Some(id) {
                self.renaming = None;
            }
        }
        tracing::debug!("{} disabled = {}", id, disabled);
        true
    }

    // ---- Focus ----

    /// Record `id` as the focused item. Disabled items cannot take focus.
    pub fn focus_item(&mut self, id: NodeId) -> bool {
        if !self.is_selectable(id) {
            return false;
        }
        self.last_focused = Some(id);
        true
    }

    /// Resolve where focus goes when the container itself is focused: the
    /// last focused item, else the active item, else the first selectable
    /// item. The target is revealed if a collapsed ancestor hides it.
    pub fn focus(&mut self) -> Option<NodeId> {
        let target = self
            .last_focused
            .filter(|id| self.is_selectable(*id))
            .or(self.active_item.filter(|id| self.is_selectable(*id)))
            .or_else(|| self.first_selectable());
        if let Some(id) = target {
            self.reveal(id);
        }
        self.last_focused = target;
        target
    }

    fn is_visible(&self, id: NodeId) -> bool {
        let mut cursor = self.get(id).and_then(|item| item.parent);
        while let Some(p) = cursor {
            match self.get(p) {
                Some(item) if item.is_expanded() => cursor = item.parent,
                _ => return false,
            }
        }
        self.contains(id)
    }

    fn first_selectable(&self) -> Option<NodeId> {
        self.visible_rows()
            .into_iter()
            .map(|row| row.id)
            .find(|id| self.is_selectable(*id))
    }

    fn last_selectable(&self) -> Option<NodeId> {
        self.visible_rows()
            .into_iter()
            .rev()
            .map(|row| row.id)
            .find(|id| self.is_selectable(*id))
    }

    fn next_selectable(&self, from: NodeId) -> Option<NodeId> {
        let rows = self.visible_rows();
        let pos = rows.iter().position(|row| row.id == from)?;
        rows[pos + 1..]
            .iter()
            .map(|row| row.id)
            .find(|id| self.is_selectable(*id))
    }

    fn prev_selectable(&self, from: NodeId) -> Option<NodeId> {
        let rows = self.visible_rows();
        let pos = rows.iter().position(|row| row.id == from)?;
        rows[..pos]
            .iter()
            .rev()
            .map(|row| row.id)
            .find(|id| self.is_selectable(*id))
    }

    // ---- Rename ----

    /// Enter rename mode on `id`. Any other item being renamed is cancelled.
    pub fn begin_rename(&mut self, id: NodeId) -> bool {
        if !self.is_selectable(id) {
            return false;
        }
        if let Some(other) = self.renaming.filter(|other| *other != id) {
            self.cancel_rename(other);
        }
        let started = self.get_mut(id).is_some_and(TreeItem::begin_rename);
        if started {
            self.renaming = Some(id);
            self.last_focused = Some(id);
        }
        started
    }

    /// Leave rename mode applying `new_label`. Blank or unchanged labels are
    /// dropped silently. Returns true when the label changed.
    pub fn commit_rename(&mut self, id: NodeId, new_label: &str) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        let was_editing = item.is_editing();
        let old_label = item.commit_rename(new_label);
        if was_editing && self.renaming == Some(id) {
            self.renaming = None;
        }
        match old_label {
            Some(old_label) => {
                tracing::debug!("{} renamed {:?} -> {:?}", id, old_label, new_label);
                self.emit(TreeEvent::Renamed {
                    id,
                    old_label,
                    new_label: new_label.to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// Leave rename mode keeping the current label. A blur that follows is
    /// a no-op because the item is no longer editing.
    pub fn cancel_rename(&mut self, id: NodeId) -> bool {
        let cancelled = self.get_mut(id).is_some_and(TreeItem::cancel_rename);
        if cancelled && self.renaming == Some(id) {
            self.renaming = None;
        }
        cancelled
    }

    /// The rename input lost focus with `value` typed in it.
    pub fn blur_rename(&mut self, id: NodeId, value: &str) -> bool {
        if !self.get(id).is_some_and(TreeItem::is_editing) {
            return false;
        }
        self.commit_rename(id, value)
    }

    // ---- Input dispatch ----

    /// Keyboard handler. Returns true when the key was consumed.
    pub fn handle_key(&mut self, press: KeyPress) -> bool {
        if press.repeat || press.ctrl || self.renaming.is_some() {
            return false;
        }
        let Some(focused) = self.last_focused.filter(|id| self.is_selectable(*id)) else {
            return false;
        };
        if !self.has_selectable() {
            return false;
        }
        // Focus may have been placed on a hidden item programmatically.
        if !self.is_visible(focused) {
            self.reveal(focused);
        }

        match press.logical_key(self.direction) {
            NavKey::Down => {
                if let Some(next) = self.next_selectable(focused) {
                    self.focus_item(next);
                }
            }
            NavKey::Up => {
                if let Some(prev) = self.prev_selectable(focused) {
                    self.focus_item(prev);
                }
            }
            NavKey::Right => {
                let Some(item) = self.get(focused) else {
                    return false;
                };
                if item.has_children() && !item.is_expanded() {
                    self.set_expanded(focused, true);
                } else if item.is_expanded() {
                    let child = item
                        .children
                        .iter()
                        .copied()
                        .find(|c| self.is_selectable(*c));
                    if let Some(child) = child {
                        self.focus_item(child);
                    }
                }
            }
            NavKey::Left => {
                let Some(item) = self.get(focused) else {
                    return false;
                };
                if item.is_expanded() {
                    self.set_expanded(focused, false);
                } else if let Some(parent) = item.parent {
                    self.focus_item(parent);
                }
            }
            NavKey::Home => {
                if let Some(first) = self.first_selectable() {
                    self.focus_item(first);
                }
            }
            NavKey::End => {
                if let Some(last) = self.last_selectable() {
                    self.focus_item(last);
                }
            }
            NavKey::Enter | NavKey::Space => {
                self.activate(focused);
            }
        }
        true
    }

    /// Single click on a row part. Returns true when state changed.
    pub fn handle_click(&mut self, id: NodeId, region: HitRegion) -> bool {
        if !self.is_selectable(id) {
            return false;
        }
        match region {
            HitRegion::ExpandGlyph => self.toggle_expanded(id),
            HitRegion::Row => {
                let changed = self.activate(id);
                // Re-clicking the active row still moves focus to it.
                changed || self.focus_item(id)
            }
            HitRegion::RenameInput => false,
        }
    }

    /// Double click: the row toggles expansion, the glyph already did on
    /// the first click.
    pub fn handle_double_click(&mut self, id: NodeId, region: HitRegion) -> bool {
        match region {
            HitRegion::Row => {
                let eligible = self
                    .get(id)
                    .is_some_and(|item| item.is_selectable() && item.has_children());
                eligible && self.toggle_expanded(id)
            }
            HitRegion::ExpandGlyph | HitRegion::RenameInput => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A -> [B, C -> [D]], everything expanded
    fn sample() -> (TreeContainer, [NodeId; 4]) {
        let mut tree = TreeContainer::new();
        let a = tree.push(None, TreeItem::new("A").expanded()).unwrap();
        let b = tree.push(Some(a), TreeItem::new("B")).unwrap();
        let c = tree.push(Some(a), TreeItem::new("C").expanded()).unwrap();
        let d = tree.push(Some(c), TreeItem::new("D")).unwrap();
        (tree, [a, b, c, d])
    }

    fn active_count(tree: &TreeContainer) -> usize {
        tree.document_order()
            .into_iter()
            .filter(|id| tree.get(*id).unwrap().is_active())
            .count()
    }

    fn down() -> KeyPress {
        KeyPress::new(NavKey::Down)
    }

    #[test]
    fn depth_follows_parent() {
        let (tree, [a, b, c, d]) = sample();
        assert_eq!(tree.get(a).unwrap().depth(), 0);
        assert_eq!(tree.get(b).unwrap().depth(), 1);
        assert_eq!(tree.get(c).unwrap().depth(), 1);
        assert_eq!(tree.get(d).unwrap().depth(), 2);
    }

    #[test]
    fn insert_under_missing_parent_is_rejected() {
        let (mut tree, [_, b, ..]) = sample();
        tree.remove(b);
        assert_eq!(tree.push(Some(b), TreeItem::new("orphan")), None);
    }

    #[test]
    fn insert_respects_index() {
        let (mut tree, [a, b, c, _]) = sample();
        let x = tree.insert(Some(a), Some(0), TreeItem::new("X")).unwrap();
        assert_eq!(tree.get(a).unwrap().children(), &[x, b, c]);
        let y = tree.insert(Some(a), Some(99), TreeItem::new("Y")).unwrap();
        assert_eq!(tree.get(a).unwrap().children(), &[x, b, c, y]);
    }

    #[test]
    fn activation_keeps_a_single_active_item() {
        let (mut tree, [a, b, c, d]) = sample();
        assert!(tree.activate(b));
        assert!(tree.activate(d));
        assert_eq!(active_count(&tree), 1);
        assert_eq!(tree.active_item(), Some(d));
        assert!(!tree.get(b).unwrap().is_active());

        tree.remove(d);
        assert_eq!(active_count(&tree), 1);
        assert_eq!(tree.active_item(), Some(c));

        tree.set_disabled(c, true);
        assert_eq!(active_count(&tree), 0);
        tree.activate(a);
        assert_eq!(active_count(&tree), 1);
    }

    #[test]
    fn activate_reports_previous_and_current() {
        let (mut tree, [_, b, _, d]) = sample();
        tree.activate(b);
        tree.drain_events();
        tree.activate(d);
        let events = tree.drain_events();
        assert_eq!(
            events,
            vec![
                TreeEvent::ItemActiveChanged { id: b, active: false },
                TreeEvent::ItemActiveChanged { id: d, active: true },
                TreeEvent::ActiveChanged {
                    previous: Some(b),
                    current: Some(d)
                },
            ]
        );
        assert_eq!(tree.last_focused(), Some(d));
    }

    #[test]
    fn reactivating_is_silent() {
        let (mut tree, [_, b, ..]) = sample();
        tree.activate(b);
        tree.drain_events();
        assert!(!tree.activate(b));
        assert!(tree.drain_events().is_empty());
    }

    #[test]
    fn disabled_item_cannot_be_activated() {
        let (mut tree, [_, b, ..]) = sample();
        tree.set_disabled(b, true);
        assert!(!tree.activate(b));
        assert!(!tree.set_item_active(b, true));
        assert_eq!(tree.active_item(), None);
    }

    #[test]
    fn disabling_active_item_clears_reference() {
        let (mut tree, [_, b, ..]) = sample();
        tree.activate(b);
        assert!(tree.set_disabled(b, true));
        assert!(!tree.get(b).unwrap().is_active());
        assert_eq!(tree.active_item(), None);
        assert_eq!(tree.last_focused(), None);
        assert!(tree.drain_events().contains(&TreeEvent::ActiveChanged {
            previous: Some(b),
            current: None
        }));
    }

    #[test]
    fn removing_last_child_collapses_parent() {
        let (mut tree, [_, _, c, d]) = sample();
        assert!(tree.get(c).unwrap().is_expanded());
        tree.remove(d);
        assert!(!tree.get(c).unwrap().is_expanded());
        assert!(tree.drain_events().contains(&TreeEvent::Collapsed { id: c }));
    }

    #[test]
    fn removing_last_child_of_lazy_parent_collapses_it() {
        let mut tree = TreeContainer::new();
        let p = tree
            .push(None, TreeItem::new("P").with_may_have_children())
            .unwrap();
        tree.set_expanded(p, true);
        let c = tree.push(Some(p), TreeItem::new("C")).unwrap();
        tree.remove(c);
        assert!(!tree.get(p).unwrap().is_expanded());
    }

    #[test]
    fn removing_subtree_with_active_item_promotes_parent() {
        let (mut tree, [a, _, c, d]) = sample();
        tree.activate(d);
        assert_eq!(tree.remove(c), 2);
        assert_eq!(tree.active_item(), Some(a));
        assert!(tree.get(a).unwrap().is_active());
        assert!(!tree.contains(d));
    }

    #[test]
    fn removing_active_root_leaves_nothing_active() {
        let mut tree = TreeContainer::new();
        let r = tree.push(None, TreeItem::new("root")).unwrap();
        tree.activate(r);
        tree.remove(r);
        assert_eq!(tree.active_item(), None);
        assert_eq!(tree.last_focused(), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn removed_active_with_disabled_parent_leaves_nothing_active() {
        let (mut tree, [_, _, c, d]) = sample();
        tree.activate(d);
        tree.set_disabled(c, true);
        // d is still active, only c was disabled
        assert_eq!(tree.active_item(), Some(d));
        tree.remove(d);
        assert_eq!(tree.active_item(), None);
        assert_eq!(active_count(&tree), 0);
    }

    #[test]
    fn expanding_a_leaf_is_a_no_op() {
        let (mut tree, [_, b, ..]) = sample();
        assert!(!tree.set_expanded(b, true));
        assert!(tree.drain_events().is_empty());
    }

    #[test]
    fn collapsing_moves_focus_out_of_hidden_subtree() {
        let (mut tree, [a, _, _, d]) = sample();
        tree.focus_item(d);
        tree.set_expanded(a, false);
        assert_eq!(tree.last_focused(), Some(a));
    }

    #[test]
    fn reveal_expands_ancestors() {
        let (mut tree, [a, _, c, d]) = sample();
        tree.set_expanded(c, false);
        tree.set_expanded(a, false);
        tree.reveal(d);
        assert!(tree.get(a).unwrap().is_expanded());
        assert!(tree.get(c).unwrap().is_expanded());
        assert!(tree.visible_rows().iter().any(|row| row.id == d));
    }

    #[test]
    fn arrow_down_walks_depth_first_and_stops_at_end() {
        let (mut tree, [a, b, c, d]) = sample();
        tree.focus_item(a);
        let mut visited = Vec::new();
        for _ in 0..4 {
            tree.handle_key(down());
            visited.push(tree.last_focused().unwrap());
        }
        assert_eq!(visited, vec![b, c, d, d]);

        tree.handle_key(KeyPress::new(NavKey::Home));
        assert_eq!(tree.last_focused(), Some(a));
        tree.handle_key(KeyPress::new(NavKey::End));
        assert_eq!(tree.last_focused(), Some(d));
        tree.handle_key(KeyPress::new(NavKey::Up));
        assert_eq!(tree.last_focused(), Some(c));
    }

    #[test]
    fn traversal_skips_disabled_and_collapsed() {
        let (mut tree, [a, b, c, d]) = sample();
        tree.set_disabled(b, true);
        tree.set_expanded(c, false);
        tree.focus_item(a);
        tree.handle_key(down());
        assert_eq!(tree.last_focused(), Some(c));
        tree.handle_key(down());
        assert_eq!(tree.last_focused(), Some(c));
        assert!(!tree.visible_rows().iter().any(|row| row.id == d));
    }

    #[test]
    fn right_expands_then_descends() {
        let (mut tree, [_, _, c, d]) = sample();
        tree.set_expanded(c, false);
        tree.focus_item(c);
        tree.handle_key(KeyPress::new(NavKey::Right));
        assert!(tree.get(c).unwrap().is_expanded());
        assert_eq!(tree.last_focused(), Some(c));
        tree.handle_key(KeyPress::new(NavKey::Right));
        assert_eq!(tree.last_focused(), Some(d));
    }

    #[test]
    fn left_collapses_then_ascends() {
        let (mut tree, [a, _, c, _]) = sample();
        tree.focus_item(c);
        tree.handle_key(KeyPress::new(NavKey::Left));
        assert!(!tree.get(c).unwrap().is_expanded());
        tree.handle_key(KeyPress::new(NavKey::Left));
        assert_eq!(tree.last_focused(), Some(a));
    }

    #[test]
    fn rtl_swaps_horizontal_arrows() {
        let (mut tree, [_, _, c, d]) = sample();
        tree.set_direction(Direction::Rtl);
        tree.focus_item(c);
        tree.handle_key(KeyPress::new(NavKey::Left));
        assert_eq!(tree.last_focused(), Some(d));
        tree.handle_key(KeyPress::new(NavKey::Right));
        assert_eq!(tree.last_focused(), Some(c));
    }

    #[test]
    fn enter_and_space_activate_focused() {
        let (mut tree, [_, b, c, _]) = sample();
        tree.focus_item(b);
        tree.handle_key(KeyPress::new(NavKey::Enter));
        assert_eq!(tree.active_item(), Some(b));
        tree.focus_item(c);
        tree.handle_key(KeyPress::new(NavKey::Space));
        assert_eq!(tree.active_item(), Some(c));
    }

    #[test]
    fn repeat_and_ctrl_chords_are_ignored() {
        let (mut tree, [a, ..]) = sample();
        tree.focus_item(a);
        assert!(!tree.handle_key(down().repeated()));
        assert!(!tree.handle_key(down().with_ctrl()));
        assert_eq!(tree.last_focused(), Some(a));
    }

    #[test]
    fn keys_need_a_focused_item() {
        let (mut tree, _) = sample();
        assert!(!tree.handle_key(down()));
    }

    #[test]
    fn glyph_click_toggles_without_activating() {
        let (mut tree, [_, _, c, _]) = sample();
        assert!(tree.handle_click(c, HitRegion::ExpandGlyph));
        assert!(!tree.get(c).unwrap().is_expanded());
        assert_eq!(tree.active_item(), None);
        assert!(tree.handle_click(c, HitRegion::Row));
        assert_eq!(tree.active_item(), Some(c));
        assert!(!tree.get(c).unwrap().is_expanded());
    }

    #[test]
    fn clicks_on_disabled_rows_are_ignored() {
        let (mut tree, [_, _, c, _]) = sample();
        tree.set_disabled(c, true);
        assert!(!tree.handle_click(c, HitRegion::ExpandGlyph));
        assert!(!tree.handle_click(c, HitRegion::Row));
        assert!(tree.get(c).unwrap().is_expanded());
    }

    #[test]
    fn double_click_toggles_rows_with_children_only() {
        let (mut tree, [_, b, c, _]) = sample();
        assert!(tree.handle_double_click(c, HitRegion::Row));
        assert!(!tree.get(c).unwrap().is_expanded());
        assert!(!tree.handle_double_click(c, HitRegion::ExpandGlyph));
        assert!(!tree.handle_double_click(b, HitRegion::Row));
    }

    #[test]
    fn focus_delegation_priority() {
        let (mut tree, [a, b, c, _]) = sample();
        assert_eq!(tree.focus(), Some(a));

        let mut tree2 = sample().0;
        let b2 = tree2.find("B").unwrap();
        tree2.activate(b2);
        let c2 = tree2.find("C").unwrap();
        tree2.focus_item(c2);
        assert_eq!(tree2.focus(), Some(c2));

        tree.activate(b);
        tree.focus_item(c);
        tree.set_disabled(c, true);
        assert_eq!(tree.focus(), Some(b));
    }

    #[test]
    fn focus_reveals_hidden_active_item() {
        let mut tree = TreeContainer::new();
        let a = tree.push(None, TreeItem::new("A").expanded()).unwrap();
        let b = tree.push(Some(a), TreeItem::new("B")).unwrap();
        let t = tree.push(None, TreeItem::new("T")).unwrap();
        tree.activate(b);
        tree.focus_item(a);
        tree.set_expanded(a, false);
        tree.focus_item(t);
        tree.set_disabled(t, true);

        assert_eq!(tree.focus(), Some(b));
        assert!(tree.get(a).unwrap().is_expanded());
        assert!(tree.visible_rows().iter().any(|row| row.id == b));
        tree.handle_key(KeyPress::new(NavKey::Up));
        assert_eq!(tree.last_focused(), Some(a));
    }

    #[test]
    fn traversal_from_hidden_focus_reveals_it_first() {
        let (mut tree, [a, _, c, d]) = sample();
        tree.focus_item(d);
        tree.set_expanded(c, false);
        // Collapsing moved focus; put it back on the hidden item.
        tree.focus_item(d);
        assert!(tree.handle_key(KeyPress::new(NavKey::Up)));
        assert_eq!(tree.last_focused(), Some(c));
        assert!(tree.get(c).unwrap().is_expanded());
        assert!(tree.get(a).unwrap().is_expanded());
    }

    #[test]
    fn focus_on_fully_disabled_tree_is_none() {
        let mut tree = TreeContainer::new();
        let x = tree.push(None, TreeItem::new("x").disabled()).unwrap();
        assert_eq!(tree.focus(), None);
        assert!(!tree.focus_item(x));
    }

    #[test]
    fn rename_with_same_label_emits_nothing() {
        let (mut tree, [a, ..]) = sample();
        tree.drain_events();
        assert!(tree.begin_rename(a));
        assert!(!tree.commit_rename(a, "A"));
        assert_eq!(tree.label(a), Some("A"));
        assert!(tree.drain_events().is_empty());
        assert_eq!(tree.editing_item(), None);
    }

    #[test]
    fn rename_commit_emits_event() {
        let (mut tree, [a, ..]) = sample();
        tree.drain_events();
        tree.begin_rename(a);
        assert!(tree.commit_rename(a, "Alpha"));
        assert_eq!(
            tree.drain_events(),
            vec![TreeEvent::Renamed {
                id: a,
                old_label: "A".to_string(),
                new_label: "Alpha".to_string()
            }]
        );
    }

    #[test]
    fn escape_then_blur_keeps_original_label() {
        let (mut tree, [a, ..]) = sample();
        tree.drain_events();
        tree.begin_rename(a);
        assert!(tree.cancel_rename(a));
        assert!(!tree.blur_rename(a, "typed text"));
        assert_eq!(tree.label(a), Some("A"));
        assert!(tree.drain_events().is_empty());
    }

    #[test]
    fn blur_commits_while_editing() {
        let (mut tree, [a, ..]) = sample();
        tree.begin_rename(a);
        assert!(tree.blur_rename(a, "Alpha"));
        assert_eq!(tree.label(a), Some("Alpha"));
    }

    #[test]
    fn keys_are_ignored_while_renaming() {
        let (mut tree, [a, ..]) = sample();
        tree.focus_item(a);
        tree.begin_rename(a);
        assert!(!tree.handle_key(down()));
        assert_eq!(tree.last_focused(), Some(a));
    }

    #[test]
    fn beginning_a_second_rename_cancels_the_first() {
        let (mut tree, [a, b, ..]) = sample();
        tree.begin_rename(a);
        tree.begin_rename(b);
        assert!(!tree.get(a).unwrap().is_editing());
        assert_eq!(tree.editing_item(), Some(b));
    }

    #[test]
    fn removing_renamed_item_clears_editing() {
        let (mut tree, [_, b, ..]) = sample();
        tree.begin_rename(b);
        tree.remove(b);
        assert_eq!(tree.editing_item(), None);
    }
}
