use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::info;

use console_core::client::DaemonClient;
use console_core::config::ConsoleConfig;
use console_core::events::NetEvent;

mod app;
mod net;
mod ui;

use app::App;
use net::Dispatcher;

#[derive(Parser, Debug)]
#[command(name = "filesync-console")]
#[command(about = "Terminal console for a file synchronization daemon")]
#[command(version)]
struct Cli {
    /// Daemon base URL (e.g., http://127.0.0.1:8080)
    #[arg(long, env = "FILESYNC_SERVER_URL")]
    server_url: Option<String>,

    /// Path to config file
    #[arg(long, env = "FILESYNC_CONFIG_PATH")]
    config_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "FILESYNC_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    // Load or default the config; CLI args override the file.
    let config_path = cli
        .config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(ConsoleConfig::default_path);

    let mut config = if config_path.exists() {
        info!("loading config from {}", config_path.display());
        ConsoleConfig::load(&config_path)?
    } else {
        ConsoleConfig::default()
    };

    if let Some(url) = cli.server_url {
        config.server_url = url;
    }
    if config.server_url.is_empty() {
        anyhow::bail!("server URL is required (--server-url or config file)");
    }

    let client = DaemonClient::new(
        &config.server_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    info!(
        "filesync-console v{} connecting to {}",
        env!("CARGO_PKG_VERSION"),
        client.base_url(),
    );

    enable_raw_mode().context("enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, client, &config).await;

    // Restore the terminal even when the loop failed.
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();

    result
}

/// The alternate screen owns stdout, so logs go to a file next to the config.
fn init_logging(level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let log_path = ConsoleConfig::default_log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: DaemonClient,
    config: &ConsoleConfig,
) -> Result<()> {
    let (net_tx, mut net_rx) = mpsc::channel::<NetEvent>(64);
    let dispatcher = Dispatcher::new(client, net_tx);

    let mut app = App::new();
    dispatcher.dispatch_all(app.startup());

    let mut input = EventStream::new();
    let mut poll_timer =
        tokio::time::interval(Duration::from_secs(config.status_poll_secs.max(1)));
    poll_timer.tick().await; // consume the immediate first tick

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            maybe_event = input.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        dispatcher.dispatch_all(app.handle_key(key));
                    }
                    Some(Ok(_)) => {} // resize, mouse, release
                    Some(Err(e)) => return Err(e).context("terminal input"),
                    None => break,
                }
            }
            Some(event) = net_rx.recv() => {
                dispatcher.dispatch_all(app.apply_net(event));
            }
            _ = poll_timer.tick() => {
                dispatcher.dispatch_all(app.on_tick());
            }
        }

        if app.should_quit() {
            info!("quit requested, shutting down");
            break;
        }
    }

    Ok(())
}
