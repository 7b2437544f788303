//! Side navigation tree widget
//!
//! Renders the visible rows of a [`TreeContainer`] and remembers where each
//! part of each row landed so pointer presses can be resolved to a
//! [`HitRegion`].

use std::ops::Range;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::{Direction, HitRegion, NodeId, TreeContainer};
use crate::ui::theme::Theme;
use crate::ui::widgets::text_input::TextInput;

const GLYPH_WIDTH: u16 = 2;

/// Display width of a span in columns, pinned at `u16::MAX`.
fn columns(span: &Span) -> u16 {
    u16::try_from(span.width()).unwrap_or(u16::MAX)
}

/// Columns occupied by one row, relative to the widget's left edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub id: NodeId,
    pub glyph: Option<Range<u16>>,
    pub label: Range<u16>,
    pub editing: bool,
}

/// A rendered line of the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavLine {
    Separator,
    Row(RowLayout),
}

/// Scroll offset and the hit map of the last render
#[derive(Debug, Default)]
pub struct SideNavState {
    pub offset: usize,
    lines: Vec<NavLine>,
    area: Rect,
}

impl SideNavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[NavLine] {
        &self.lines
    }

    /// Resolve a terminal cell to the row and row part under it.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(NodeId, HitRegion)> {
        let area = self.area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let x = column - area.x;
        let index = self.offset + (row - area.y) as usize;
        match self.lines.get(index)? {
            NavLine::Separator => None,
            NavLine::Row(layout) => {
                let region = if layout.editing && layout.label.contains(&x) {
                    HitRegion::RenameInput
                } else if layout.glyph.as_ref().is_some_and(|g| g.contains(&x)) {
                    HitRegion::ExpandGlyph
                } else {
                    HitRegion::Row
                };
                Some((layout.id, region))
            }
        }
    }

    /// Adjust the offset so `line` is inside a window of `height` lines.
    fn scroll_to(&mut self, line: usize, height: usize) {
        if height == 0 {
            return;
        }
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }
}

/// Side navigation widget
pub struct SideNav<'a> {
    tree: &'a TreeContainer,
    theme: &'a Theme,
    indent: u16,
    focused: bool,
    rename: Option<&'a TextInput>,
}

impl<'a> SideNav<'a> {
    pub fn new(tree: &'a TreeContainer, theme: &'a Theme) -> Self {
        Self {
            tree,
            theme,
            indent: 2,
            focused: false,
            rename: None,
        }
    }

    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    /// Whether the pane has keyboard focus; the focused row is marked only
    /// then.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Draft shown in place of the label of the item being renamed
    pub fn rename(mut self, input: Option<&'a TextInput>) -> Self {
        self.rename = input;
        self
    }

    fn glyph(&self, expanded: bool) -> &'static str {
        match (expanded, self.tree.direction()) {
            (true, Direction::Ltr) => "▾ ",
            (false, Direction::Ltr) => "▸ ",
            (true, Direction::Rtl) => " ▾",
            (false, Direction::Rtl) => " ◂",
        }
    }

    /// Build the lines and their hit map for a widget `width` columns wide.
    fn layout(&self, width: u16) -> Vec<(NavLine, Line<'a>)> {
        let theme = self.theme;
        let rtl = self.tree.direction() == Direction::Rtl;
        let mut out = Vec::new();

        for row in self.tree.visible_rows() {
            let Some(item) = self.tree.get(row.id) else {
                continue;
            };

            if item.separator {
                let rule = "─".repeat(width as usize);
                out.push((NavLine::Separator, Line::styled(rule, theme.dim())));
            }

            let editing = item.is_editing() && self.tree.editing_item() == Some(row.id);
            let label_text = match (editing, self.rename) {
                (true, Some(input)) => input.value.clone(),
                _ => item.label.clone(),
            };

            let row_style = if item.is_disabled() {
                theme.disabled_row()
            } else if item.error {
                theme.error_row()
            } else if item.is_active() {
                theme.active_row()
            } else {
                theme.normal()
            };
            let row_style = if self.focused && self.tree.last_focused() == Some(row.id) {
                row_style.patch(theme.focus_marker())
            } else {
                row_style
            };

            let indent = (row.depth as u16).saturating_mul(self.indent);
            let mut spans = vec![Span::raw(" ".repeat(indent as usize))];
            let mut x = indent;

            let glyph = if item.has_children() {
                spans.push(Span::styled(self.glyph(item.is_expanded()), theme.accent()));
                Some(x..x.saturating_add(GLYPH_WIDTH))
            } else {
                spans.push(Span::raw("  "));
                None
            };
            x = x.saturating_add(GLYPH_WIDTH);

            if let Some(icon) = &item.icon {
                let span = Span::raw(format!("{} ", icon));
                x = x.saturating_add(columns(&span));
                spans.push(span);
            }

            let label_span = if editing {
                Span::styled(label_text, theme.rename_input())
            } else {
                Span::raw(label_text)
            };
            let label_width = columns(&label_span);
            spans.push(label_span);
            let mut label = x..x.saturating_add(label_width);
            let mut glyph = glyph;

            let line = if rtl {
                let content = label.end;
                let shift = width.saturating_sub(content);
                let mirror =
                    |r: Range<u16>| (shift + (content - r.end))..(shift + (content - r.start));
                label = mirror(label);
                glyph = glyph.map(mirror);
                spans.reverse();
                Line::from(spans).alignment(Alignment::Right)
            } else {
                Line::from(spans)
            };

            out.push((
                NavLine::Row(RowLayout {
                    id: row.id,
                    glyph,
                    label,
                    editing,
                }),
                line.style(row_style),
            ));
        }
        out
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut SideNavState) {
        let (lines, text): (Vec<NavLine>, Vec<Line>) = self.layout(area.width).into_iter().unzip();

        if let Some(focused) = self.tree.last_focused() {
            let index = lines
                .iter()
                .position(|l| matches!(l, NavLine::Row(r) if r.id == focused));
            if let Some(index) = index {
                state.scroll_to(index, area.height as usize);
            }
        }
        state.offset = state.offset.min(lines.len().saturating_sub(1));
        state.lines = lines;
        state.area = area;

        if state.lines.is_empty() {
            let empty = Paragraph::new("(empty)").style(self.theme.dim());
            frame.render_widget(empty, area);
            return;
        }

        let visible: Vec<Line> = text
            .into_iter()
            .skip(state.offset)
            .take(area.height as usize)
            .collect();
        frame.render_widget(Paragraph::new(visible), area);

        // Terminal cursor inside the rename input
        if let (Some(editing), Some(input)) = (self.tree.editing_item(), self.rename) {
            let position = state.lines.iter().enumerate().find_map(|(i, l)| match l {
                NavLine::Row(r) if r.id == editing => Some((i, r.label.clone())),
                _ => None,
            });
            if let Some((i, label)) = position {
                if i >= state.offset && i < state.offset + area.height as usize {
                    let prefix: String = input.value.chars().take(input.cursor_pos).collect();
                    let cursor = label.start.saturating_add(columns(&Span::raw(prefix)));
                    frame.set_cursor_position((
                        area.x + cursor.min(area.width.saturating_sub(1)),
                        area.y + (i - state.offset) as u16,
                    ));
                }
            }
        }
    }
}
