//! Application state shared with the journal task

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::{broadcast, mpsc, RwLock};

use crate::models::TreeEvent;

/// Messages for the journal task
#[derive(Debug)]
pub enum AppMessage {
    /// A tree notification, with the label of the item it concerns
    Tree {
        event: TreeEvent,
        label: Option<String>,
    },
    /// Free-form status line from the UI
    Notice(String),
}

/// UI update signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdateSignal {
    JournalUpdated,
}

/// One line of the journal
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub at: DateTime<Local>,
    pub kind: &'static str,
    pub text: String,
}

/// Central application state
pub struct AppState {
    pub journal: RwLock<VecDeque<JournalEntry>>,
    pub ui_update_tx: broadcast::Sender<UiUpdateSignal>,
    pub max_events: usize,
}

impl AppState {
    pub fn new(max_events: usize, ui_update_tx: broadcast::Sender<UiUpdateSignal>) -> Self {
        Self {
            journal: RwLock::new(VecDeque::with_capacity(max_events)),
            ui_update_tx,
            max_events,
        }
    }

    pub fn notify_ui(&self, signal: UiUpdateSignal) {
        let _ = self.ui_update_tx.send(signal);
    }

    /// Newest entries first
    pub async fn push_entry(&self, entry: JournalEntry) {
        let mut journal = self.journal.write().await;
        journal.push_front(entry);
        while journal.len() > self.max_events {
            journal.pop_back();
        }
    }
}

fn describe(event: &TreeEvent, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{} [{}]", event, label),
        None => event.to_string(),
    }
}

/// Run the journal task until every sender is gone
pub async fn run_state_manager(state: Arc<AppState>, mut rx: mpsc::Receiver<AppMessage>) {
    tracing::info!("Journal started");

    while let Some(msg) = rx.recv().await {
        let entry = match msg {
            AppMessage::Tree { event, label } => {
                let text = describe(&event, label.as_deref());
                match &event {
                    TreeEvent::Renamed { .. } | TreeEvent::ActiveChanged { .. } => {
                        tracing::info!("{}", text)
                    }
                    _ => tracing::debug!("{}", text),
                }
                JournalEntry {
                    at: Local::now(),
                    kind: event.kind(),
                    text,
                }
            }
            AppMessage::Notice(text) => {
                tracing::info!("{}", text);
                JournalEntry {
                    at: Local::now(),
                    kind: "notice",
                    text,
                }
            }
        };

        state.push_entry(entry).await;
        state.notify_ui(UiUpdateSignal::JournalUpdated);
    }

    tracing::info!("Journal stopped");
}
