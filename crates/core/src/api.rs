//! Wire shapes shared by the daemon and the board.

use serde::{Deserialize, Serialize};

/// Task list endpoint.
pub const TASKS_PATH: &str = "/api/tasks";

/// Liveness endpoint.
pub const HEALTH_PATH: &str = "/healthz";

/// Response header carrying the number of feed lines that failed to decode.
pub const SKIPPED_LINES_HEADER: &str = "x-feed-skipped-lines";

/// Message returned when the feed cannot be read. Never includes the path.
pub const FEED_UNAVAILABLE_MESSAGE: &str = "Failed to read tasks";

/// Error body returned by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure message.
    pub error: String,
}

impl ErrorBody {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
