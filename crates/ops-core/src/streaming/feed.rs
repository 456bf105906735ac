//! Activity feed ingestor.
//!
//! Subscribes to the push channel, keeps only `activity` events, decodes each
//! body as JSON (falling back to a raw wrapper) and hands the payload to a
//! single callback. Connection errors stop here: the channel reconnects on its
//! own and nothing is surfaced to the subscriber.

use std::sync::Arc;

use futures::StreamExt;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use super::event_source::{EventStream, HttpEventSource, PushChannel, StreamError};
use crate::config::CoreConfig;
use crate::constants::ACTIVITY_EVENT;

type Callback = Box<dyn FnMut(Value) + Send>;

/// Decode an event body, substituting `{ "kind": "raw", "data": body }`
/// when it is not valid JSON.
pub fn decode_payload(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| raw_payload(body))
}

pub fn raw_payload(body: &str) -> Value {
    json!({ "kind": "raw", "data": body })
}

pub struct ActivityFeed {
    channel: Arc<dyn PushChannel>,
}

impl ActivityFeed {
    pub fn new(channel: impl PushChannel) -> Self {
        Self {
            channel: Arc::new(channel),
        }
    }

    /// Feed over SSE from the configured API
    pub fn from_config(config: &CoreConfig) -> Result<Self, StreamError> {
        let source = HttpEventSource::from_config(config)?;
        tracing::debug!(url = source.url(), "activity feed endpoint");
        Ok(Self::new(source))
    }

    /// Open one connection and call `on_event` for every activity payload.
    ///
    /// Returns immediately; delivery runs on a spawned task, so this must be
    /// called from within a Tokio runtime. `on_event` must not unsubscribe
    /// its own subscription.
    pub fn subscribe<F>(&self, on_event: F) -> Subscription
    where
        F: FnMut(Value) + Send + 'static,
    {
        let slot: Arc<Mutex<Option<Callback>>> = Arc::new(Mutex::new(Some(Box::new(on_event))));
        let events = self.channel.open();
        let task = tokio::spawn(pump(events, slot.clone()));
        tracing::info!("activity feed subscribed");

        Subscription {
            slot,
            task: Mutex::new(Some(task)),
        }
    }
}

async fn pump(mut events: EventStream, slot: Arc<Mutex<Option<Callback>>>) {
    while let Some(item) = events.next().await {
        match item {
            Ok(event) if event.event == ACTIVITY_EVENT => {
                let payload = decode_payload(&event.data);
                // Held across the call so unsubscribe waits out an in-flight delivery
                let mut guard = slot.lock();
                match guard.as_mut() {
                    Some(on_event) => on_event(payload),
                    None => break,
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "activity feed connection error, waiting for reconnect");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Connected,
    Disconnected,
}

/// Handle for one live subscription. Dropping it unsubscribes.
pub struct Subscription {
    slot: Arc<Mutex<Option<Callback>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Subscription {
    /// Close the connection. No callback runs after this returns. Safe to
    /// call more than once.
    pub fn unsubscribe(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            tracing::info!("activity feed unsubscribed");
        }
        self.slot.lock().take();
    }

    pub fn state(&self) -> SubscriptionState {
        if self.slot.lock().is_some() {
            SubscriptionState::Connected
        } else {
            SubscriptionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == SubscriptionState::Connected
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
