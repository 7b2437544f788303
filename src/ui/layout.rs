//! Screen layout management

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Standard application layout areas
pub struct AppLayout {
    pub nav: Rect,
    pub journal: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Create layout from terminal area. The navigation panel sits on the
    /// leading side: left for left-to-right, right otherwise.
    pub fn new(area: Rect, nav_percent: u16, rtl: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Panels
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let nav_percent = nav_percent.min(100);
        let (first, second) = if rtl {
            (100 - nav_percent, nav_percent)
        } else {
            (nav_percent, 100 - nav_percent)
        };
        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(first), Constraint::Percentage(second)])
            .split(rows[0]);

        let (nav, journal) = if rtl {
            (panels[1], panels[0])
        } else {
            (panels[0], panels[1])
        };

        Self {
            nav,
            journal,
            status: rows[1],
        }
    }
}

/// Dialog/popup centered layout
pub struct DialogLayout {
    pub dialog: Rect,
}

impl DialogLayout {
    /// Create centered dialog with fixed dimensions
    pub fn centered(area: Rect, width: u16, height: u16) -> Self {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;

        Self {
            dialog: Rect::new(x, y, width.min(area.width), height.min(area.height)),
        }
    }
}
