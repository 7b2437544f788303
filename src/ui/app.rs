//! Main TUI application

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::{broadcast, mpsc};

use crate::app::actions::{ActionResult, UserAction};
use crate::app::events::{AppEvent, ClickTracker, EventHandler};
use crate::app::state::{AppMessage, AppState, JournalEntry, UiUpdateSignal};
use crate::config::keybinds::KeyBindings;
use crate::config::settings::Settings;
use crate::models::{Direction, TreeContainer};
use crate::ui::layout::{AppLayout, DialogLayout};
use crate::ui::panes::nav::NavPane;
use crate::ui::theme::Theme;
use crate::ui::widgets::journal::render_journal;
use crate::ui::widgets::statusbar::{build_status_line, tree_status};

/// Which panel receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneId {
    Nav,
    Journal,
}

/// Main TUI application
pub struct TuiApp {
    state: Arc<AppState>,
    state_tx: mpsc::Sender<AppMessage>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
    ui_update_rx: broadcast::Receiver<UiUpdateSignal>,
    keybinds: KeyBindings,
    settings: Settings,
    config_path: Option<String>,
    keyboard_enhanced: bool,

    // UI state
    theme: Theme,
    show_help: bool,
    focus: PaneId,
    nav: NavPane,
    journal: Vec<JournalEntry>,
}

impl TuiApp {
    pub fn new(
        state: Arc<AppState>,
        state_tx: mpsc::Sender<AppMessage>,
        tree: TreeContainer,
        settings: &Settings,
        config_path: Option<String>,
    ) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        // Without event types, held keys arrive as plain presses.
        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let ui_update_rx = state.ui_update_tx.subscribe();
        let clicks = ClickTracker::new(Duration::from_millis(settings.double_click_ms));
        let mut nav = NavPane::new(tree, clicks, settings.indent_width);
        nav.focus();

        Ok(Self {
            state,
            state_tx,
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(settings.tick_rate_ms)),
            ui_update_rx,
            keybinds: KeyBindings::default(),
            settings: settings.clone(),
            config_path,
            keyboard_enhanced,

            theme: Theme::from_name(&settings.theme),
            show_help: false,
            focus: PaneId::Nav,
            nav,
            journal: Vec::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let _ = self
            .state_tx
            .send(AppMessage::Notice(format!(
                "Loaded {} items",
                self.nav.tree().len()
            )))
            .await;

        loop {
            // Check for UI update signals
            let mut journal_dirty = false;
            while let Ok(signal) = self.ui_update_rx.try_recv() {
                if signal == UiUpdateSignal::JournalUpdated {
                    journal_dirty = true;
                }
            }
            if journal_dirty {
                let journal = self.state.journal.read().await;
                self.journal = journal.iter().cloned().collect();
            }

            // Draw UI
            self.draw()?;

            // Handle input events
            let Some(event) = self.event_handler.next() else {
                continue;
            };
            match event {
                AppEvent::Key(key) => {
                    if self.show_help {
                        self.show_help = false;
                        continue;
                    }
                    if self.focus == PaneId::Nav && self.nav.handle_rename_key(key) {
                        self.nav.forward_events(&self.state_tx).await;
                        continue;
                    }
                    let Some(action) = self.keybinds.action_for(&key) else {
                        continue;
                    };
                    if self.handle_action(action) == ActionResult::Quit {
                        break;
                    }
                }
                AppEvent::Mouse(mouse) => {
                    if let Some(hit) = self.nav.resolve_pointer(&mouse) {
                        self.focus = PaneId::Nav;
                        self.nav.handle_pointer(hit);
                    }
                }
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
            self.nav.forward_events(&self.state_tx).await;
        }

        // Flush whatever the last action produced.
        self.nav.forward_events(&self.state_tx).await;
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> ActionResult {
        match action {
            UserAction::Quit => return ActionResult::Quit,
            UserAction::Help => self.show_help = true,
            UserAction::SwitchPane => {
                self.focus = match self.focus {
                    PaneId::Nav => {
                        self.nav.unfocus();
                        PaneId::Journal
                    }
                    PaneId::Journal => {
                        self.nav.focus();
                        PaneId::Nav
                    }
                };
            }
            UserAction::ToggleDirection => {
                self.nav.handle_action(&action);
                self.save_direction();
            }
            other => {
                if self.focus == PaneId::Nav {
                    self.nav.handle_action(&other);
                }
            }
        }
        ActionResult::Continue
    }

    /// Remember the reading direction for the next start.
    fn save_direction(&mut self) {
        self.settings.direction = self.nav.tree().direction();
        match self.settings.save(self.config_path.as_deref()) {
            Ok(()) => tracing::debug!("saved direction {:?}", self.settings.direction),
            Err(e) => tracing::warn!("Failed to save settings: {:#}", e),
        }
    }

    fn draw(&mut self) -> Result<()> {
        let theme = &self.theme;
        let show_help = self.show_help;
        let focus = self.focus;
        let nav = &mut self.nav;
        let journal = &self.journal;

        self.terminal.draw(|frame| {
            let rtl = nav.tree().direction() == Direction::Rtl;
            let layout = AppLayout::new(frame.area(), 40, rtl);

            // Navigation
            let nav_block = Block::default()
                .borders(Borders::ALL)
                .border_style(if focus == PaneId::Nav {
                    theme.border_focused()
                } else {
                    theme.border()
                })
                .title(" Navigation ");
            let inner = nav_block.inner(layout.nav);
            frame.render_widget(nav_block, layout.nav);
            nav.render(frame, inner, theme, focus == PaneId::Nav);

            // Journal
            render_journal(frame, layout.journal, journal, theme, focus == PaneId::Journal);

            // Status bar
            let status_line = build_status_line(tree_status(nav.tree(), theme), "│");
            frame.render_widget(Paragraph::new(status_line), layout.status);

            // Help overlay
            if show_help {
                render_help(frame, theme);
            }
        })?;

        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();
    let help_area = DialogLayout::centered(area, 60, 24).dialog;

    let help_text = vec![
        "",
        "  Side navigation - Keyboard Shortcuts",
        "  ────────────────────────────────────",
        "",
        "  Navigation:",
        "    ↑/↓, k/j      Previous/next item",
        "    →/l           Expand, then enter children",
        "    ←/h           Collapse, then go to parent",
        "    Home/End      First/last item",
        "    Enter, Space  Activate item",
        "    Tab           Switch panel",
        "    t             Toggle left-to-right / right-to-left (saved)",
        "",
        "  Editing:",
        "    F2            Rename (Enter saves, Esc cancels)",
        "    n / N         New child / new sibling",
        "    Delete        Remove item",
        "    x / X         Disable item / enable all",
        "",
        "  Mouse: click the arrow to expand, the row to activate",
        "",
        "  Press any key to close",
    ];

    let help_block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.normal());

    let help_content = Paragraph::new(help_text.join("\n"))
        .block(help_block)
        .style(theme.normal());

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(help_content, help_area);
}
