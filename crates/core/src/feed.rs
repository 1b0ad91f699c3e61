//! Newline-delimited task feed.
//!
//! The feed is owned by an external producer. Reading is best-effort: each
//! line decodes on its own and a bad line only costs that line.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::model::TaskRecord;

/// Result of decoding a whole feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    /// Decoded records in file order.
    pub records: Vec<TaskRecord>,
    /// Non-blank lines that failed to decode.
    pub skipped_lines: usize,
}

/// Feed-level failure.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The file is missing, unreadable, or not UTF-8.
    #[error("feed unavailable at {path}: {source}")]
    Unavailable {
        /// Location that was read.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },
}

/// Decodes feed text. Blank lines are ignored; undecodable lines are counted
/// and dropped.
pub fn decode_feed(text: &str) -> FeedSnapshot {
    let mut snapshot = FeedSnapshot::default();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match TaskRecord::from_line(line) {
            Ok(record) => snapshot.records.push(record),
            Err(e) => {
                debug!(line = index + 1, error = %e, "skipping undecodable feed line");
                snapshot.skipped_lines += 1;
            }
        }
    }
    snapshot
}

/// Reads a feed file from a fixed location.
#[derive(Debug, Clone)]
pub struct FeedReader {
    path: PathBuf,
}

impl FeedReader {
    /// Creates a reader for `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Configured location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file in one operation and decodes it.
    pub async fn read(&self) -> Result<FeedSnapshot, FeedError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FeedError::Unavailable {
                path: self.path.clone(),
                source,
            })?;
        Ok(decode_feed(&text))
    }

    /// Blocking variant for command-line tools.
    pub fn read_blocking(&self) -> Result<FeedSnapshot, FeedError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| FeedError::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        Ok(decode_feed(&text))
    }
}
