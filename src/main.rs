use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::EnvFilter;

use sidenav::app::state::{run_state_manager, AppState};
use sidenav::config::settings::Settings;
use sidenav::models::{Direction, Outline, OutlineNode};
use sidenav::ui::app::TuiApp;

#[derive(Parser, Debug)]
#[command(name = "sidenav-tui")]
#[command(about = "Keyboard and mouse driven side navigation tree")]
#[command(version)]
struct Args {
    /// Outline file (JSON) describing the tree
    #[arg(short, long)]
    outline: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Lay the tree out right-to-left
    #[arg(long)]
    rtl: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

fn init_logging(settings: &Settings, override_path: Option<&str>) -> Result<()> {
    let path = PathBuf::from(override_path.unwrap_or(settings.log_file.as_str()));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Built-in tree used when no outline file is configured
fn demo_outline() -> Outline {
    let mut archive = OutlineNode::new("Archive");
    archive.separator = true;
    archive.may_have_children = true;

    let mut drafts = OutlineNode::new("Drafts");
    drafts.disabled = true;

    let mut inbox = OutlineNode::new("Inbox");
    inbox.active = true;

    let mut mail = OutlineNode::new("Mail").with_children(vec![
        inbox,
        OutlineNode::new("Sent"),
        drafts,
    ]);
    mail.expanded = true;

    let projects = OutlineNode::new("Projects").with_children(vec![
        OutlineNode::new("alpha").with_children(vec![
            OutlineNode::new("notes"),
            OutlineNode::new("designs"),
        ]),
        OutlineNode::new("beta"),
    ]);

    Outline {
        direction: Direction::Ltr,
        items: vec![mail, projects, archive],
    }
}

fn load_outline(path: Option<&str>) -> Result<Outline> {
    match path {
        Some(path) => Outline::load(Path::new(path))
            .with_context(|| format!("loading outline {}", path)),
        None => Ok(demo_outline()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load settings
    let settings = Settings::load(args.config.as_deref())?;
    init_logging(&settings, args.log_file.as_deref())?;
    tracing::info!("sidenav-tui starting");

    let outline_path = args.outline.as_deref().or(settings.outline_path.as_deref());
    let outline = load_outline(outline_path)?;
    let mut tree = outline.build();
    if args.rtl {
        tree.set_direction(Direction::Rtl);
    } else if outline.direction == Direction::Ltr {
        tree.set_direction(settings.direction);
    }

    // Create channels for communication
    let (state_tx, state_rx) = mpsc::channel(1000);
    let (ui_update_tx, _) = broadcast::channel(100);

    // Create shared application state
    let state = Arc::new(AppState::new(settings.max_journal_events, ui_update_tx));

    // Start journal
    let state_clone = state.clone();
    let journal_handle = tokio::spawn(async move {
        run_state_manager(state_clone, state_rx).await;
    });

    // Run TUI (blocks until user quits)
    let result = {
        let mut tui = TuiApp::new(state.clone(), state_tx, tree, &settings, args.config.clone())?;
        tui.run().await
    };

    // The sender went away with the TUI; let the journal drain.
    let _ = journal_handle.await;
    tracing::info!("sidenav-tui shutting down");

    result
}
