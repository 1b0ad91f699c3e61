use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use taskboard_core::api::TASKS_PATH;
use thiserror::Error;
use tracing::debug;

/// What the feed endpoint answered.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedResponse {
    /// The raw task array. Elements are not validated yet.
    Tasks(Vec<Value>),
    /// The daemon reported a structured `{ "error": ... }`.
    Failed(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connect, DNS, timeout or body read failure.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    /// Body is neither a task array nor an object with a non-empty string `error`.
    #[error("unexpected response: {0}")]
    UnexpectedShape(String),
    /// Non-success status without an error body.
    #[error("HTTP error: {}", .0.as_u16())]
    Status(StatusCode),
}

/// Fetches the task feed from a daemon.
#[derive(Debug, Clone)]
pub struct TaskFeedClient {
    client: Client,
    base_url: String,
}

impl TaskFeedClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn tasks_url(&self) -> String {
        format!("{}{}", self.base_url, TASKS_PATH)
    }

    /// Issues one uncached request for the current feed.
    pub async fn fetch_tasks(&self) -> Result<FeedResponse, FetchError> {
        let url = self.tasks_url();
        debug!(%url, "fetching tasks");

        let resp = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(FetchError::Transport)?;
        debug!(status = %status, bytes = body.len(), "feed response");
        interpret(status, &body)
    }
}

/// Classifies a response. An error object wins over the status code so the
/// daemon's message reaches the user.
pub fn interpret(status: StatusCode, body: &[u8]) -> Result<FeedResponse, FetchError> {
    let parsed = serde_json::from_slice::<Value>(body);

    if let Ok(Value::Object(map)) = &parsed {
        match map.get("error") {
            Some(Value::String(msg)) if !msg.trim().is_empty() => {
                return Ok(FeedResponse::Failed(msg.clone()))
            }
            Some(Value::String(_)) | Some(Value::Null) | None => {}
            Some(other) => {
                return Err(FetchError::UnexpectedShape(format!(
                    "error field is not a string: {other}"
                )))
            }
        }
    }

    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    match parsed {
        Ok(Value::Array(items)) => Ok(FeedResponse::Tasks(items)),
        Ok(Value::Object(_)) => Err(FetchError::UnexpectedShape("object without tasks".into())),
        Ok(other) => Err(FetchError::UnexpectedShape(format!("expected an array, got {other}"))),
        Err(e) => Err(FetchError::UnexpectedShape(format!("invalid json: {e}"))),
    }
}
