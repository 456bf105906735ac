use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;

use ops_core::{ActivityFeed, CoreConfig};

use crate::dispatch::ApiEvent;
use crate::input::{handle_key, handle_paste};
use crate::render::render;
use crate::ui::{App, Tui};

pub(crate) async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    config: &CoreConfig,
    mut api_rx: tokio::sync::mpsc::UnboundedReceiver<ApiEvent>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(50));

    // The subscription lives exactly as long as this loop; every return path
    // drops it, which closes the connection.
    let feed = ActivityFeed::from_config(config).context("Failed to set up activity feed")?;
    let (activity_tx, mut activity_rx) = tokio::sync::mpsc::unbounded_channel();
    let subscription = feed.subscribe(move |payload| {
        let _ = activity_tx.send(payload);
    });

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                            if app.pending_quit {
                                app.quit();
                            } else {
                                // footer shows the warning
                                app.pending_quit = true;
                            }
                        } else {
                            app.pending_quit = false;
                            handle_key(app, key);
                        }
                    }
                    Some(Ok(Event::Paste(text))) => handle_paste(app, &text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("Terminal event stream failed"),
                    None => app.quit(),
                }
            }

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(event) = api_rx.recv() => {
                app.apply_api_event(event);
            }

            Some(payload) = activity_rx.recv() => {
                app.record_activity(payload);
            }
        }
    }

    subscription.unsubscribe();
    Ok(())
}
