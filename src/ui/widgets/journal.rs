//! Event journal panel

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::state::JournalEntry;
use crate::ui::theme::Theme;

fn kind_style(theme: &Theme, kind: &str) -> Style {
    match kind {
        "renamed" | "active-changed" => theme.accent().add_modifier(Modifier::BOLD),
        "notice" => theme.dim(),
        _ => theme.normal(),
    }
}

/// Journal lines, newest first
pub fn journal_lines<'a>(entries: &'a [JournalEntry], theme: &Theme) -> Vec<Line<'a>> {
    entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(entry.at.format("%H:%M:%S ").to_string(), theme.dim()),
                Span::styled(entry.text.as_str(), kind_style(theme, entry.kind)),
            ])
        })
        .collect()
}

pub fn render_journal(
    frame: &mut Frame,
    area: Rect,
    entries: &[JournalEntry],
    theme: &Theme,
    focused: bool,
) {
    let border = if focused {
        theme.border_focused()
    } else {
        theme.border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" Events ({}) ", entries.len()));

    let items: Vec<ListItem> = journal_lines(entries, theme)
        .into_iter()
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
