//! Navigation pane: glue between terminal input and the tree

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{layout::Rect, Frame};
use tokio::sync::mpsc;

use crate::app::actions::{ClickKind, PointerHit, UserAction};
use crate::app::events::{left_click, ClickTracker};
use crate::app::state::AppMessage;
use crate::models::{HitRegion, KeyPress, NodeId, TreeContainer, TreeEvent, TreeItem};
use crate::ui::theme::Theme;
use crate::ui::widgets::text_input::{InputOutcome, TextInput};
use crate::ui::widgets::tree::{SideNav, SideNavState};

pub struct NavPane {
    tree: TreeContainer,
    nav_state: SideNavState,
    rename_input: Option<TextInput>,
    clicks: ClickTracker,
    indent: u16,
    created: usize,
}

impl NavPane {
    pub fn new(tree: TreeContainer, clicks: ClickTracker, indent: u16) -> Self {
        Self {
            tree,
            nav_state: SideNavState::new(),
            rename_input: None,
            clicks,
            indent,
            created: 0,
        }
    }

    pub fn tree(&self) -> &TreeContainer {
        &self.tree
    }

    pub fn is_renaming(&self) -> bool {
        self.rename_input.is_some()
    }

    /// Keys typed while a rename is open. Returns false when no rename is
    /// open and the key should go through the key bindings instead.
    pub fn handle_rename_key(&mut self, key: KeyEvent) -> bool {
        let Some(input) = self.rename_input.as_mut() else {
            return false;
        };
        if key.kind == KeyEventKind::Release {
            return true;
        }
        // A held Enter or Escape must not act twice.
        if key.kind == KeyEventKind::Repeat && matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            return true;
        }
        // Tab leaves the input like a focus change would.
        if key.code == KeyCode::Tab {
            self.blur();
            return true;
        }
        match input.handle_key(key) {
            InputOutcome::Submit => {
                if let Some(id) = self.tree.editing_item() {
                    let value = input.value.clone();
                    self.tree.commit_rename(id, &value);
                }
                self.blur();
            }
            InputOutcome::Cancel => {
                if let Some(id) = self.tree.editing_item() {
                    self.tree.cancel_rename(id);
                }
                self.blur();
            }
            InputOutcome::Edited | InputOutcome::Ignored => {}
        }
        true
    }

    /// Focus leaves the rename input. After a submit or cancel the item is
    /// no longer editing and this does nothing to the tree.
    fn blur(&mut self) {
        if let Some(input) = self.rename_input.take() {
            if let Some(id) = self.tree.editing_item() {
                self.tree.blur_rename(id, &input.value);
            }
        }
    }

    /// The pane received keyboard focus.
    pub fn focus(&mut self) -> Option<NodeId> {
        self.tree.focus()
    }

    /// The pane lost keyboard focus.
    pub fn unfocus(&mut self) {
        self.blur();
    }

    pub fn handle_action(&mut self, action: &UserAction) -> bool {
        match action {
            UserAction::Navigate(press) => self.navigate(*press),
            UserAction::Rename => self.begin_rename(),
            UserAction::NewChild => self.add_item(true),
            UserAction::NewSibling => self.add_item(false),
            UserAction::Delete => match self.tree.last_focused() {
                Some(id) => {
                    self.blur();
                    let removed = self.tree.remove(id) > 0;
                    if self.tree.last_focused().is_none() {
                        self.tree.focus();
                    }
                    removed
                }
                None => false,
            },
            UserAction::DisableItem => match self.tree.last_focused() {
                Some(id) => {
                    self.blur();
                    let changed = self.tree.set_disabled(id, true);
                    self.tree.focus();
                    changed
                }
                None => false,
            },
            UserAction::EnableAll => {
                let mut changed = false;
                for id in self.tree.document_order() {
                    changed |= self.tree.set_disabled(id, false);
                }
                changed
            }
            UserAction::ToggleDirection => {
                let direction = self.tree.direction().toggled();
                self.tree.set_direction(direction);
                true
            }
            UserAction::SwitchPane | UserAction::Help | UserAction::Quit => false,
        }
    }

    fn navigate(&mut self, press: KeyPress) -> bool {
        if self.tree.last_focused().is_none() && self.tree.focus().is_none() {
            return false;
        }
        self.tree.handle_key(press)
    }

    fn begin_rename(&mut self) -> bool {
        let Some(id) = self.tree.last_focused() else {
            return false;
        };
        if !self.tree.begin_rename(id) {
            return false;
        }
        let label = self.tree.label(id).unwrap_or_default().to_string();
        self.rename_input = Some(TextInput::new(&label));
        true
    }

    /// Insert a placeholder item next to or under the focused one and open
    /// it for renaming.
    fn add_item(&mut self, as_child: bool) -> bool {
        self.blur();
        self.created += 1;
        let item = TreeItem::new(&format!("New item {}", self.created));
        let focused = self.tree.last_focused();

        let id = match (focused, as_child) {
            (Some(f), true) => {
                let id = self.tree.push(Some(f), item);
                self.tree.set_expanded(f, true);
                id
            }
            (Some(f), false) => {
                let parent = self.tree.get(f).and_then(|i| i.parent());
                let siblings = match parent {
                    Some(p) => self.tree.get(p).map(|i| i.children().to_vec()),
                    None => Some(self.tree.roots().to_vec()),
                };
                let index = siblings.and_then(|s| s.iter().position(|c| *c == f));
                self.tree.insert(parent, index.map(|i| i + 1), item)
            }
            (None, _) => self.tree.push(None, item),
        };

        match id {
            Some(id) => {
                self.tree.reveal(id);
                self.tree.focus_item(id);
                self.begin_rename()
            }
            None => false,
        }
    }

    /// Resolve a mouse event against the last rendered rows.
    pub fn resolve_pointer(&mut self, event: &MouseEvent) -> Option<PointerHit> {
        let (column, row) = left_click(event)?;
        let (id, region) = self.nav_state.hit_test(column, row)?;
        let kind = self.clicks.register(column, row);
        Some(PointerHit { id, region, kind })
    }

    pub fn handle_pointer(&mut self, hit: PointerHit) -> bool {
        if hit.region == HitRegion::RenameInput {
            return false;
        }
        // Clicking anywhere but the input moves focus out of it.
        self.blur();
        match hit.kind {
            ClickKind::Single => self.tree.handle_click(hit.id, hit.region),
            ClickKind::Double => self.tree.handle_double_click(hit.id, hit.region),
        }
    }

    /// Tree notifications raised since the last call, with labels resolved
    /// while the items still exist.
    pub fn take_messages(&mut self) -> Vec<AppMessage> {
        self.tree
            .drain_events()
            .into_iter()
            .map(|event| {
                let id = match &event {
                    TreeEvent::Expanded { id }
                    | TreeEvent::Collapsed { id }
                    | TreeEvent::Renamed { id, .. }
                    | TreeEvent::ItemActiveChanged { id, .. }
                    | TreeEvent::DisabledChanged { id, .. } => Some(*id),
                    TreeEvent::ActiveChanged { current, .. } => *current,
                };
                let label = id.and_then(|id| self.tree.label(id)).map(str::to_string);
                AppMessage::Tree { event, label }
            })
            .collect()
    }

    pub async fn forward_events(&mut self, tx: &mpsc::Sender<AppMessage>) {
        for msg in self.take_messages() {
            if let Err(e) = tx.send(msg).await {
                tracing::warn!("Journal is gone: {}", e);
                break;
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        SideNav::new(&self.tree, theme)
            .indent(self.indent)
            .focused(focused)
            .rename(self.rename_input.as_ref())
            .render(frame, area, &mut self.nav_state);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::models::{NavKey, Outline};

    fn pane() -> NavPane {
        let outline = Outline::from_json(
            r#"{ "items": [
                { "label": "Mail", "expanded": true, "children": [
                    { "label": "Inbox" }, { "label": "Sent" }
                ]},
                { "label": "Trash" }
            ]}"#,
        )
        .unwrap();
        NavPane::new(
            outline.build(),
            ClickTracker::new(Duration::from_millis(400)),
            2,
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn nav(key: NavKey) -> UserAction {
        UserAction::Navigate(KeyPress::new(key))
    }

    fn type_text(pane: &mut NavPane, text: &str) {
        for c in text.chars() {
            assert!(pane.handle_rename_key(key(KeyCode::Char(c))));
        }
    }

    fn draw(pane: &mut NavPane) {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| pane.render(frame, frame.area(), &theme, true))
            .unwrap();
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn first_navigation_delegates_focus() {
        let mut pane = pane();
        assert!(pane.handle_action(&nav(NavKey::Down)));
        let inbox = pane.tree().find("Inbox").unwrap();
        assert_eq!(pane.tree().last_focused(), Some(inbox));
    }

    #[test]
    fn rename_submit_commits() {
        let mut pane = pane();
        pane.focus();
        assert!(pane.handle_action(&UserAction::Rename));
        type_text(&mut pane, "box");
        pane.handle_rename_key(key(KeyCode::Enter));
        assert!(!pane.is_renaming());
        let mail = pane.tree().find("Mailbox").unwrap();
        let messages = pane.take_messages();
        assert!(matches!(
            &messages[..],
            [AppMessage::Tree { event: TreeEvent::Renamed { id, .. }, label: Some(label) }]
                if *id == mail && label == "Mailbox"
        ));
    }

    #[test]
    fn rename_escape_keeps_label() {
        let mut pane = pane();
        pane.focus();
        pane.handle_action(&UserAction::Rename);
        type_text(&mut pane, "zzz");
        pane.handle_rename_key(key(KeyCode::Esc));
        assert!(!pane.is_renaming());
        assert!(pane.tree().find("Mail").is_some());
        assert!(pane.take_messages().is_empty());
    }

    #[test]
    fn rename_ignores_releases_and_held_keys() {
        let mut pane = pane();
        pane.focus();
        pane.handle_action(&UserAction::Rename);

        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        type_text(&mut pane, "x");
        assert!(pane.handle_rename_key(release));

        let mut held_enter = key(KeyCode::Enter);
        held_enter.kind = KeyEventKind::Repeat;
        assert!(pane.handle_rename_key(held_enter));
        assert!(pane.is_renaming());

        pane.handle_rename_key(key(KeyCode::Enter));
        assert!(pane.tree().find("Mailx").is_some());
    }

    #[test]
    fn leaving_the_input_commits() {
        let mut pane = pane();
        pane.focus();
        pane.handle_action(&UserAction::Rename);
        type_text(&mut pane, "!");
        pane.handle_rename_key(key(KeyCode::Tab));
        assert!(pane.tree().find("Mail!").is_some());
    }

    #[test]
    fn new_child_opens_rename() {
        let mut pane = pane();
        let trash = pane.tree().find("Trash").unwrap();
        pane.tree.focus_item(trash);
        assert!(pane.handle_action(&UserAction::NewChild));
        assert!(pane.is_renaming());
        let created = pane.tree().editing_item().unwrap();
        assert_eq!(pane.tree().get(created).unwrap().parent(), Some(trash));
        assert!(pane.tree().get(trash).unwrap().is_expanded());
    }

    #[test]
    fn new_sibling_goes_after_focused() {
        let mut pane = pane();
        let inbox = pane.tree().find("Inbox").unwrap();
        pane.tree.focus_item(inbox);
        pane.handle_action(&UserAction::NewSibling);
        let mail = pane.tree().find("Mail").unwrap();
        let children = pane.tree().get(mail).unwrap().children().to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], inbox);
        assert_eq!(pane.tree().label(children[1]), Some("New item 1"));
    }

    #[test]
    fn delete_moves_focus() {
        let mut pane = pane();
        let inbox = pane.tree().find("Inbox").unwrap();
        pane.tree.activate(inbox);
        pane.handle_action(&UserAction::Delete);
        let mail = pane.tree().find("Mail").unwrap();
        assert_eq!(pane.tree().active_item(), Some(mail));
        assert_eq!(pane.tree().last_focused(), Some(mail));
    }

    #[test]
    fn disable_then_enable_all() {
        let mut pane = pane();
        let inbox = pane.tree().find("Inbox").unwrap();
        pane.tree.activate(inbox);
        assert!(pane.handle_action(&UserAction::DisableItem));
        assert_eq!(pane.tree().active_item(), None);
        assert!(pane.tree().get(inbox).unwrap().is_disabled());
        assert!(pane.handle_action(&UserAction::EnableAll));
        assert!(!pane.tree().get(inbox).unwrap().is_disabled());
    }

    #[test]
    fn clicks_dispatch_by_region() {
        let mut pane = pane();
        draw(&mut pane);
        let mail = pane.tree().find("Mail").unwrap();

        let hit = pane.resolve_pointer(&click(0, 0)).unwrap();
        assert_eq!(hit.region, HitRegion::ExpandGlyph);
        assert!(pane.handle_pointer(hit));
        assert!(!pane.tree().get(mail).unwrap().is_expanded());
        assert_eq!(pane.tree().active_item(), None);

        draw(&mut pane);
        let hit = pane.resolve_pointer(&click(4, 0)).unwrap();
        assert_eq!(hit.kind, ClickKind::Single);
        pane.handle_pointer(hit);
        assert_eq!(pane.tree().active_item(), Some(mail));

        let hit = pane.resolve_pointer(&click(4, 0)).unwrap();
        assert_eq!(hit.kind, ClickKind::Double);
        assert!(pane.handle_pointer(hit));
        assert!(pane.tree().get(mail).unwrap().is_expanded());
    }

    #[test]
    fn clicking_elsewhere_commits_rename() {
        let mut pane = pane();
        pane.focus();
        pane.handle_action(&UserAction::Rename);
        type_text(&mut pane, "2");
        draw(&mut pane);
        let hit = pane.resolve_pointer(&click(2, 3)).unwrap();
        pane.handle_pointer(hit);
        assert!(!pane.is_renaming());
        assert!(pane.tree().find("Mail2").is_some());
    }

    #[tokio::test]
    async fn forwards_events_to_journal() {
        let mut pane = pane();
        let (tx, mut rx) = mpsc::channel(8);
        let trash = pane.tree().find("Trash").unwrap();
        pane.tree.activate(trash);
        pane.forward_events(&tx).await;
        drop(tx);
        let mut kinds = Vec::new();
        while let Some(AppMessage::Tree { event, .. }) = rx.recv().await {
            kinds.push(event.kind());
        }
        assert_eq!(kinds, vec!["item-active-changed", "active-changed"]);
    }
}
