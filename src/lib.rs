pub mod cli;
pub mod display;
pub mod instance;
pub mod notify;
pub mod settings;
pub mod timer;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Command};
use display::{StatusDisplay, TerminalDisplay};
use notify::{DesktopNotifier, Notifier};
use settings::UserSettings;
use timer::{Mode, Pacing, SessionController};

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let (mode, title) = match cli::interpret(&cli.words) {
        Command::Quit => {
            let stopped = instance::quit_running_instances();
            info!("Stopped {} running instance(s)", stopped);
            return Ok(());
        }
        Command::Pomodoro { title } => (Mode::Work, title),
        Command::Fixed { minutes, title } => (Mode::Fixed { minutes }, title),
    };

    info!("SandwichTimer starting up...");

    let settings = match UserSettings::config_path() {
        Some(path) => UserSettings::load(&path)?,
        None => UserSettings::default(),
    };
    let pacing = Pacing::from_settings(&settings);
    let label = title.unwrap_or_else(|| mode.default_label());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let display: Arc<dyn StatusDisplay> = Arc::new(TerminalDisplay::new());
        let notifier: Arc<dyn Notifier> = Arc::new(DesktopNotifier::new(events_tx.clone()));
        let controller = SessionController::new(settings, pacing, label, display, notifier);

        {
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    shutdown.cancel();
                }
            });
        }

        controller.start(mode).await;
        controller.run(events_rx, shutdown).await;
    });

    info!("SandwichTimer shut down");
    Ok(())
}
