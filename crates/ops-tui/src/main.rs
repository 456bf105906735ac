mod dispatch;
mod input;
mod render;
mod runtime;
mod tail;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ops_core::tracing_setup::{init_stderr_tracing, init_tracing};
use ops_core::{ApiClient, CoreConfig};

use crate::dispatch::ApiDispatcher;
use crate::runtime::run_app;
use ui::App;

#[derive(Parser)]
#[command(name = "ops-companion")]
#[command(about = "Terminal dashboard for habits, interview notes and service health")]
struct Cli {
    /// API origin, e.g. http://localhost:8080 (overrides config and OPS_API_BASE)
    #[arg(long)]
    base_url: Option<String>,

    /// Path to JSON config file (baseUrl, reconnectDelayMs, requestTimeoutSecs)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Print the live activity feed to stdout instead of opening the dashboard
    #[arg(long)]
    tail: bool,
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let config = CoreConfig::resolve(cli.config.as_deref()).context("Failed to load config")?;
    match &cli.base_url {
        Some(base_url) => config
            .with_base_url(base_url.as_str())
            .context("Invalid --base-url"),
        None => Ok(config),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if cli.tail {
        init_stderr_tracing();
        return tail::run_tail(&config).await;
    }

    init_tracing().context("Failed to open log file")?;

    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let client = ApiClient::new(config.clone()).context("Failed to build HTTP client")?;
    let (api_tx, api_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut app = App::new(Some(ApiDispatcher::new(client, api_tx)));
    app.refresh_all();
    tracing::info!(base_url = %config.base_url, "dashboard starting");

    let mut terminal = ui::init_terminal()?;
    let result = run_app(&mut terminal, &mut app, &config, api_rx).await;
    ui::restore_terminal()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "dashboard exited with error");
        eprintln!("Error: {err:#}");
    }

    Ok(())
}
