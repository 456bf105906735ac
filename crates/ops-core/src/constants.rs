//! Application-wide constants
//!
//! Endpoint paths and fixed limits shared by the API client, the activity
//! feed and the dashboard.

/// Default API base URL when neither config file nor environment sets one
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "OPS_API_BASE";

/// Environment variable naming the log file (the TUI owns stdout)
pub const LOG_FILE_ENV: &str = "OPS_LOG_FILE";

/// Server-push channel path
pub const STREAM_PATH: &str = "/api/v1/stream/events";

/// Event type carried by activity messages on the push channel
pub const ACTIVITY_EVENT: &str = "activity";

/// Maximum number of records kept in the recent activity buffer
pub const RECENT_ACTIVITY_CAPACITY: usize = 30;

/// Reconnection delay used until the server sends a `retry:` field
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 3000;

/// Floor for the reconnection delay, whether configured or sent as `retry:`
pub const MIN_RECONNECT_DELAY_MS: u64 = 100;

/// Default per-request timeout for request/response calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// API paths
pub mod paths {
    pub const HABITS: &str = "/api/v1/habits";
    pub const CHECKINS: &str = "/api/v1/checkins";
    pub const SUMMARY_TODAY: &str = "/api/v1/summary/today";
    pub const INTERVIEW_ENTRIES: &str = "/api/v1/interview/entries";
    pub const WEBHOOKS_RECENT: &str = "/api/v1/webhooks/recent";
    pub const HEALTH_LIVE: &str = "/api/v1/health/live";
    pub const HEALTH_READY: &str = "/api/v1/health/ready";
}
