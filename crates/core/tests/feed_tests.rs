//! Integration tests for feed reading.

use std::io::Write;

use taskboard_core::{FeedError, FeedReader, StatusClass, TaskRecord};

fn feed_file(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[tokio::test]
async fn reads_valid_records_and_skips_the_rest() {
    let f = feed_file(concat!(
        r#"{"task_id":"t1","task":"Render hero","agent":"Prometheus","status":"In Progress"}"#,
        "\n",
        r#"{"task_id":"t2","task":"Broken""#,
        "\n",
        "\n",
        r#"{"task_id":"t3","task":"Write docs","agent":"Hermes","status":"Error","error":"timeout"}"#,
        "\n",
        "\"just a string\"\n",
    ));

    let snap = FeedReader::new(f.path()).read().await.unwrap();

    assert_eq!(snap.records.len(), 2);
    assert_eq!(snap.skipped_lines, 2);
    assert_eq!(snap.records[0].task_id.as_deref(), Some("t1"));
    assert_eq!(snap.records[0].status_class(), StatusClass::Positive);
    assert_eq!(snap.records[1].task_id.as_deref(), Some("t3"));
    assert_eq!(snap.records[1].error.as_deref(), Some("timeout"));
}

#[tokio::test]
async fn empty_file_is_an_empty_feed() {
    let f = feed_file("");
    let snap = FeedReader::new(f.path()).read().await.unwrap();
    assert!(snap.records.is_empty());
    assert_eq!(snap.skipped_lines, 0);

    let f = feed_file("\n   \n\t\n");
    let snap = FeedReader::new(f.path()).read().await.unwrap();
    assert!(snap.records.is_empty());
}

#[tokio::test]
async fn missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let err = FeedReader::new(&path).read().await.unwrap_err();
    let FeedError::Unavailable { path: reported, source } = err;
    assert_eq!(reported, path);
    assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
}

#[tokio::test]
async fn non_utf8_file_is_unavailable() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(&[0xff, 0xfe, b'\n']).unwrap();
    f.flush().unwrap();

    assert!(matches!(
        FeedReader::new(f.path()).read().await,
        Err(FeedError::Unavailable { .. })
    ));
}

#[test]
fn blocking_read_matches_async_decoder() {
    let f = feed_file("{\"task_id\":\"x\"}\nnope\n");
    let snap = FeedReader::new(f.path()).read_blocking().unwrap();
    assert_eq!(snap.records.len(), 1);
    assert_eq!(snap.skipped_lines, 1);
}

#[test]
fn reencoded_records_only_carry_task_fields() {
    const KNOWN: &[&str] = &[
        "task_id",
        "task",
        "agent",
        "status",
        "output",
        "griptape_priority",
        "openai_priority",
        "grok_priority",
        "error",
    ];

    let rec = TaskRecord::from_line(
        r#"{"task_id":"1","task":"A","extra":"dropped","nested":{"a":1},"grok_priority":"high"}"#,
    )
    .unwrap();
    let value = serde_json::to_value(&rec).unwrap();
    let obj = value.as_object().unwrap();

    assert!(obj.keys().all(|k| KNOWN.contains(&k.as_str())));
    assert_eq!(obj.len(), 3);
    assert!(obj.values().all(|v| !v.is_null()));
}
