pub mod api;
pub mod config;
pub mod constants;
pub mod models;
pub mod streaming;
pub mod tracing_setup;

pub use api::{ApiClient, ApiError};
pub use config::CoreConfig;
pub use streaming::{ActivityFeed, ActivityRecord, RecentActivity, Subscription};

#[cfg(test)]
pub(crate) mod test_support {
    /// Serve `router` on an ephemeral local port; returns its base URL.
    pub async fn spawn_server(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}
