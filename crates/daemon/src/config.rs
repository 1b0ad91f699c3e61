use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use taskboard_core::FeedReader;

/// Feed location used when none is given, relative to the project root.
pub const DEFAULT_FEED_PATH: &str = "data/prometheus/tasks.json";

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub listen: SocketAddr,
    pub project_root: PathBuf,
    /// Absolute feed location.
    pub feed_path: PathBuf,
}

impl DaemonConfig {
    /// Resolves `feed_path` against `project_root` unless it is already absolute.
    pub fn new(listen: SocketAddr, project_root: PathBuf, feed_path: &Path) -> Self {
        let project_root = std::fs::canonicalize(&project_root).unwrap_or(project_root);
        let feed_path = make_abs(&project_root, feed_path);
        Self {
            listen,
            project_root,
            feed_path,
        }
    }

    pub fn feed_reader(&self) -> FeedReader {
        FeedReader::new(&self.feed_path)
    }
}

fn make_abs(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
