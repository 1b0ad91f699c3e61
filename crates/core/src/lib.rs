#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared models and feed logic for the task board.

pub mod api;
pub mod dedup;
pub mod feed;
pub mod model;

pub use feed::{decode_feed, FeedError, FeedReader, FeedSnapshot};
pub use model::{StatusClass, TaskRecord};
