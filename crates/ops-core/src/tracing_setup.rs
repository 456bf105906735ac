use std::fs::OpenOptions;
use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::LOG_FILE_ENV;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Tracing for the terminal UI. The UI owns stdout and stderr, so logs only go
/// to the file named by `OPS_LOG_FILE`; without it nothing is installed.
pub fn init_tracing() -> std::io::Result<()> {
    match std::env::var(LOG_FILE_ENV) {
        Ok(path) if !path.is_empty() => init_file_tracing(Path::new(&path)),
        _ => Ok(()),
    }
}

pub fn init_file_tracing(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let file_layer = fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init();
    Ok(())
}

/// Tracing to stderr, for headless modes where stdout carries output
pub fn init_stderr_tracing() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
