use serde_json::Value;
use tracing::warn;

use crate::client::{FeedResponse, FetchError};

/// Prefix for every client-side load failure.
pub const LOAD_FAILED_PREFIX: &str = "Failed to load tasks";

/// Display state of one board.
///
/// Starts in `Loading` and resolves exactly once.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BoardState {
    #[default]
    Loading,
    Error(String),
    Ready(Vec<Value>),
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Applies the outcome of the board's single fetch.
    ///
    /// Returns false, leaving the state untouched, if the board already resolved.
    pub fn resolve(&mut self, outcome: Result<FeedResponse, FetchError>) -> bool {
        if !self.is_loading() {
            warn!("board already resolved; ignoring late fetch result");
            return false;
        }
        *self = match outcome {
            Ok(FeedResponse::Tasks(tasks)) => Self::Ready(tasks),
            Ok(FeedResponse::Failed(msg)) => Self::Error(msg),
            Err(e) => {
                warn!(error = %e, "task fetch failed");
                Self::Error(format!("{LOAD_FAILED_PREFIX}: {e}"))
            }
        };
        true
    }
}
