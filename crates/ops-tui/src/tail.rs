// Headless mode: print the live activity feed, one line per event.

use std::io::Write;

use anyhow::{Context, Result};
use ops_core::{ActivityFeed, ActivityRecord, CoreConfig};

/// `<HH:MM:SS> <compact payload JSON>`
pub(crate) fn format_line(record: &ActivityRecord) -> String {
    format!("{} {}", record.received_at_display(), record.payload_compact())
}

pub(crate) async fn run_tail(config: &CoreConfig) -> Result<()> {
    let feed = ActivityFeed::from_config(config).context("Failed to set up activity feed")?;
    tracing::info!(base_url = %config.base_url, "tailing activity feed");

    let subscription = feed.subscribe(|payload| {
        let line = format_line(&ActivityRecord::new(payload));
        let mut stdout = std::io::stdout().lock();
        // stdout may already be closed (`| head`)
        let _ = writeln!(stdout, "{}", line);
        let _ = stdout.flush();
    });

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    subscription.unsubscribe();
    Ok(())
}
