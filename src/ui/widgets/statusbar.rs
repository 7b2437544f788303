//! Status bar widget

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::models::{Direction, TreeContainer};
use crate::ui::theme::Theme;

/// Status bar item
pub struct StatusItem {
    pub label: String,
    pub value: String,
    pub style: Style,
}

impl StatusItem {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Build a status bar line from items
pub fn build_status_line(items: Vec<StatusItem>, separator: &str) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];

    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(format!(" {} ", separator)));
        }

        if !item.label.is_empty() {
            spans.push(Span::raw(format!("{}: ", item.label)));
        }
        spans.push(Span::styled(item.value, item.style));
    }

    Line::from(spans)
}

/// Status items describing the tree
pub fn tree_status(tree: &TreeContainer, theme: &Theme) -> Vec<StatusItem> {
    let label_of = |id| {
        tree.label(id)
            .map(str::to_string)
            .unwrap_or_else(|| "-".to_string())
    };
    let active = tree.active_item().map(label_of).unwrap_or_else(|| "-".to_string());
    let focused = tree.last_focused().map(label_of).unwrap_or_else(|| "-".to_string());
    let direction = match tree.direction() {
        Direction::Ltr => "LTR",
        Direction::Rtl => "RTL",
    };

    let mut items = vec![
        StatusItem::new("Active", &active).with_style(theme.accent()),
        StatusItem::new("Focus", &focused).with_style(theme.normal()),
        StatusItem::new("Items", &tree.len().to_string()).with_style(theme.normal()),
        StatusItem::new("", direction).with_style(theme.dim()),
    ];
    if tree.editing_item().is_some() {
        items.push(StatusItem::new("", "Enter=save Esc=cancel").with_style(theme.accent()));
    }
    items.push(StatusItem::new("", "?=help q=quit").with_style(theme.dim()));
    items
}
