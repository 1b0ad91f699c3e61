//! Feed deduplication by `task_id`.

use std::collections::HashSet;
use std::io::Write;

use crate::model::TaskRecord;

/// Keeps the first record for each `task_id`, preserving order.
///
/// Records without an id cannot collide and are always kept.
pub fn dedup_by_task_id(records: Vec<TaskRecord>) -> Vec<TaskRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| match r.id() {
            Some(id) => seen.insert(id.to_string()),
            None => true,
        })
        .collect()
}

/// Writes records as newline-delimited JSON.
pub fn write_ndjson<W: Write>(mut out: W, records: &[TaskRecord]) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}
