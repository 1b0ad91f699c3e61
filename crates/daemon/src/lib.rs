#![forbid(unsafe_code)]

//! Task feed daemon: serves the task feed file over HTTP.

pub mod config;
pub mod http;

pub use config::DaemonConfig;
pub use http::{router, AppState};
