//! Switchboard TUI Entry Point
//!
//! Launches the terminal client for the backend demo.
//!
//! The backend base URL comes from `~/.config/switchboard/client.toml`, then
//! from `CHAT_API_URL` at build time, then `http://localhost:8000`.
//! Logs go to `<cache dir>/switchboard/switchboard.log`; set `RUST_LOG` to
//! change the level.

use std::fs::{self, File};
use std::io::{self, IsTerminal};
use std::panic;
use std::sync::{Arc, Mutex};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use switchboard_core::{load_config, Actions, ApiClient, ClientConfig, Page};
use switchboard_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: switchboard requires a terminal (TTY)");
        eprintln!("Run it interactively, or with `ssh -t` over SSH.");
        std::process::exit(1);
    }

    let config = load_config().unwrap_or_else(|e| {
        tracing::warn!("ignoring config file: {}", e);
        ClientConfig::default()
    });
    tracing::info!(
        base_url = %config.base_url,
        source = ?config.base_url_source,
        "starting switchboard"
    );

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: ClientConfig,
) -> anyhow::Result<()> {
    let page = Arc::new(Page::with_notification_ttl(config.notification_ttl));
    let actions = Actions::new(page.clone(), ApiClient::new(config.base_url.clone()));
    let mut app = App::new(actions, page, config.base_url);

    app.run(terminal).await?;
    Ok(())
}

/// Log to a file; stdout belongs to the terminal UI
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("switchboard")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("switchboard.log")) else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
}
