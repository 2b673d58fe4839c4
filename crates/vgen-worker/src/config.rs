//! Worker configuration.

use std::time::Duration;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base URL of the hosting queue runtime
    pub queue_url: String,
    /// Delay between polls when the queue is empty
    pub poll_interval: Duration,
    /// Timeout for queue runtime HTTP calls (take/post only, not generation)
    pub http_timeout: Duration,
    /// Back-off after a queue transport error
    pub error_backoff: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_url: "http://localhost:9000".to_string(),
            poll_interval: Duration::from_secs(1),
            http_timeout: Duration::from_secs(30),
            error_backoff: Duration::from_secs(5),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            queue_url: std::env::var("WORKER_QUEUE_URL")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            poll_interval: Duration::from_secs(
                std::env::var("WORKER_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1),
            ),
            http_timeout: Duration::from_secs(
                std::env::var("WORKER_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            error_backoff: Duration::from_secs(
                std::env::var("WORKER_ERROR_BACKOFF_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}
