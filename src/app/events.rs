//! Input event handling

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use super::actions::ClickKind;

/// Application input events
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize(u16, u16),
}

/// Event handler for terminal input
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn next(&self) -> Option<AppEvent> {
        if event::poll(self.tick_rate).ok()? {
            translate(event::read().ok()?)
        } else {
            Some(AppEvent::Tick)
        }
    }
}

/// Map a terminal event. Key releases, reported once keyboard enhancement
/// is on, are dropped; repeats pass through with their kind intact.
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => None,
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Left button presses at (column, row)
pub fn left_click(event: &MouseEvent) -> Option<(u16, u16)> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
        _ => None,
    }
}

/// Terminals report single presses only; two presses on the same cell
/// within the threshold count as a double click.
pub struct ClickTracker {
    threshold: Duration,
    last: Option<(Instant, u16, u16)>,
}

impl ClickTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last: None,
        }
    }

    pub fn register(&mut self, column: u16, row: u16) -> ClickKind {
        self.register_at(Instant::now(), column, row)
    }

    pub fn register_at(&mut self, now: Instant, column: u16, row: u16) -> ClickKind {
        match self.last {
            Some((at, c, r))
                if c == column && r == row && now.duration_since(at) <= self.threshold =>
            {
                // A third press starts over.
                self.last = None;
                ClickKind::Double
            }
            _ => {
                self.last = Some((now, column, row));
                ClickKind::Single
            }
        }
    }
}
