use std::time::Duration;

use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};

use super::sse::{SseEvent, SseParser};
use crate::config::CoreConfig;
use crate::constants::{MIN_RECONNECT_DELAY_MS, STREAM_PATH};

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Failed to connect to push channel: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("Push channel returned status {0}")]
    Status(u16),

    #[error("Push channel returned content type {0:?}, expected text/event-stream")]
    ContentType(String),

    #[error("Push channel read error: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Push channel closed by server")]
    Closed,
}

/// Events as delivered by a push channel. Errors are informational: the
/// stream keeps going after them.
pub type EventStream = BoxStream<'static, Result<SseEvent, StreamError>>;

/// A server-push channel.
///
/// `open` starts one logical connection. Reconnecting after a drop is the
/// channel's own business and happens inside the returned stream; dropping the
/// stream closes the connection.
pub trait PushChannel: Send + Sync + 'static {
    fn open(&self) -> EventStream;
}

/// SSE over HTTP with browser-style automatic reconnect: after any failure it
/// waits the reconnection delay (or the server's `retry:` value) and connects
/// again, resending the last event id. No backoff and no retry limit.
#[derive(Clone)]
pub struct HttpEventSource {
    client: reqwest::Client,
    url: String,
    reconnect_delay: Duration,
}

impl HttpEventSource {
    pub fn new(url: impl Into<String>, reconnect_delay: Duration) -> Result<Self, StreamError> {
        // No overall timeout: the response body is open-ended
        let client = reqwest::Client::builder()
            .build()
            .map_err(StreamError::Connect)?;
        Ok(Self {
            client,
            url: url.into(),
            reconnect_delay: clamp_delay(reconnect_delay),
        })
    }

    /// The activity stream endpoint of the configured API
    pub fn from_config(config: &CoreConfig) -> Result<Self, StreamError> {
        Self::new(config.url(STREAM_PATH), config.reconnect_delay)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PushChannel for HttpEventSource {
    fn open(&self) -> EventStream {
        let client = self.client.clone();
        let url = self.url.clone();
        let mut delay = self.reconnect_delay;

        let stream = async_stream::stream! {
            let mut last_event_id: Option<String> = None;

            loop {
                let mut request = client
                    .get(&url)
                    .header(ACCEPT, "text/event-stream")
                    .header(CACHE_CONTROL, "no-cache");
                if let Some(id) = last_event_id.as_deref().filter(|id| !id.is_empty()) {
                    request = request.header("Last-Event-ID", id);
                }

                match request.send().await {
                    Err(e) => {
                        yield Err(StreamError::Connect(e));
                    }
                    Ok(response) => match check_response(&response) {
                        Err(e) => {
                            yield Err(e);
                        }
                        Ok(()) => {
                            tracing::debug!(%url, "push channel connected");
                            let mut parser = SseParser::with_last_event_id(last_event_id.clone());
                            let mut body = response.bytes_stream();
                            let mut failure = StreamError::Closed;

                            while let Some(chunk) = body.next().await {
                                match chunk {
                                    Ok(bytes) => {
                                        for event in parser.feed(&bytes) {
                                            yield Ok(event);
                                        }
                                        if let Some(retry) = parser.take_retry() {
                                            delay = clamp_delay(retry);
                                        }
                                        last_event_id = parser.last_event_id().map(str::to_string);
                                    }
                                    Err(e) => {
                                        failure = StreamError::Body(e);
                                        break;
                                    }
                                }
                            }

                            yield Err(failure);
                        }
                    },
                }

                tokio::time::sleep(delay).await;
            }
        };

        Box::pin(stream)
    }
}

/// A zero delay would turn a refused connection into a busy loop
fn clamp_delay(delay: Duration) -> Duration {
    delay.max(Duration::from_millis(MIN_RECONNECT_DELAY_MS))
}

fn check_response(response: &reqwest::Response) -> Result<(), StreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(StreamError::Status(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("text/event-stream") {
        return Err(StreamError::ContentType(content_type.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        response::{
            sse::{Event, Sse},
            IntoResponse,
        },
        routing::get,
        Router,
    };
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn numbered_connections(
        State(count): State<Arc<AtomicUsize>>,
        headers: HeaderMap,
    ) -> impl IntoResponse {
        let n = count.fetch_add(1, Ordering::SeqCst) + 1;
        let last = headers
            .get("last-event-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let events = vec![Ok::<_, Infallible>(
            Event::default()
                .event("activity")
                .id(n.to_string())
                .data(format!("{}|{}", n, last)),
        )];
        Sse::new(futures::stream::iter(events))
    }

    #[tokio::test]
    async fn test_reconnects_with_last_event_id() {
        let count = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(STREAM_PATH, get(numbered_connections))
            .with_state(count.clone());
        let base = spawn_server(router).await;

        let source =
            HttpEventSource::new(format!("{}{}", base, STREAM_PATH), Duration::from_millis(20))
                .unwrap();
        let mut stream = source.open();

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.event, "activity");
        assert_eq!(first.data, "1|-");
        assert_eq!(first.id.as_deref(), Some("1"));

        // server ended the body
        assert!(matches!(
            stream.next().await.unwrap(),
            Err(StreamError::Closed)
        ));

        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(second.data, "2|1");
    }

    #[tokio::test]
    async fn test_bad_status_reported_then_retried() {
        let count = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                STREAM_PATH,
                get(|State(count): State<Arc<AtomicUsize>>| async move {
                    if count.fetch_add(1, Ordering::SeqCst) == 0 {
                        StatusCode::BAD_GATEWAY.into_response()
                    } else {
                        let events =
                            vec![Ok::<_, Infallible>(Event::default().event("activity").data("{}"))];
                        Sse::new(futures::stream::iter(events)).into_response()
                    }
                }),
            )
            .with_state(count);
        let base = spawn_server(router).await;

        let source =
            HttpEventSource::new(format!("{}{}", base, STREAM_PATH), Duration::from_millis(20))
                .unwrap();
        let mut stream = source.open();

        assert!(matches!(
            stream.next().await.unwrap(),
            Err(StreamError::Status(502))
        ));
        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.data, "{}");
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_a_failure() {
        let router = Router::new().route(STREAM_PATH, get(|| async { "plain text" }));
        let base = spawn_server(router).await;

        let source =
            HttpEventSource::new(format!("{}{}", base, STREAM_PATH), Duration::from_millis(20))
                .unwrap();
        let mut stream = source.open();

        assert!(matches!(
            stream.next().await.unwrap(),
            Err(StreamError::ContentType(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_reported() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            HttpEventSource::new(format!("http://{}{}", addr, STREAM_PATH), Duration::from_millis(20))
                .unwrap();
        let mut stream = source.open();

        assert!(matches!(
            stream.next().await.unwrap(),
            Err(StreamError::Connect(_))
        ));
        // still alive: it tries again
        assert!(stream.next().await.unwrap().is_err());
    }

    #[test]
    fn test_zero_delay_is_raised_to_floor() {
        let source = HttpEventSource::new("http://api.test", Duration::ZERO).unwrap();
        assert_eq!(
            source.reconnect_delay,
            Duration::from_millis(MIN_RECONNECT_DELAY_MS)
        );
        assert_eq!(
            clamp_delay(Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }

    #[tokio::test]
    async fn test_server_retry_zero_does_not_spin() {
        let count = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                STREAM_PATH,
                get(|State(count): State<Arc<AtomicUsize>>| async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    let events = vec![Ok::<_, Infallible>(
                        Event::default()
                            .event("activity")
                            .retry(Duration::ZERO)
                            .data("{}"),
                    )];
                    Sse::new(futures::stream::iter(events))
                }),
            )
            .with_state(count.clone());
        let base = spawn_server(router).await;

        let source =
            HttpEventSource::new(format!("{}{}", base, STREAM_PATH), Duration::from_millis(20))
                .unwrap();
        let mut stream = source.open();
        let drain = async { while stream.next().await.is_some() {} };
        let _ = tokio::time::timeout(Duration::from_millis(350), drain).await;

        // one connection per floor interval at most, not hundreds
        let connections = count.load(Ordering::SeqCst);
        assert!(connections >= 2, "reconnected {} times", connections);
        assert!(connections <= 5, "reconnected {} times", connections);
    }

    #[test]
    fn test_from_config_targets_stream_path() {
        let source = HttpEventSource::from_config(&CoreConfig::new("http://api.test")).unwrap();
        assert_eq!(source.url(), "http://api.test/api/v1/stream/events");
    }
}
