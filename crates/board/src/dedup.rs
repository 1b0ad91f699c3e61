//! `taskboard dedup`: writes a copy of a feed with one record per `task_id`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{bail, Context, Result};
use taskboard_core::{dedup::dedup_by_task_id, dedup::write_ndjson, FeedReader};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupSummary {
    pub read: usize,
    pub skipped_lines: usize,
    pub written: usize,
}

/// Deduplicates `input` into `output`. The input feed is never modified.
pub fn dedup_file(input: &Path, output: &Path) -> Result<DedupSummary> {
    if same_file(input, output) {
        bail!("output {} must differ from the input feed", output.display());
    }

    let snap = FeedReader::new(input)
        .read_blocking()
        .with_context(|| format!("read feed {}", input.display()))?;
    let read = snap.records.len();
    let unique = dedup_by_task_id(snap.records);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(output).with_context(|| format!("create {}", output.display()))?;
    write_ndjson(BufWriter::new(file), &unique)
        .with_context(|| format!("write {}", output.display()))?;

    info!(read, written = unique.len(), skipped = snap.skipped_lines, "feed deduplicated");
    Ok(DedupSummary {
        read,
        skipped_lines: snap.skipped_lines,
        written: unique.len(),
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
