//! HTTP tests: start the router on an ephemeral port and talk to it over TCP.

use std::io::Write;
use std::path::{Path, PathBuf};

use taskboard_core::{api::SKIPPED_LINES_HEADER, FeedReader};
use taskboard_daemon::{router, AppState};

async fn spawn_daemon(feed: PathBuf) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(FeedReader::new(feed)));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn write_feed(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("tasks.json");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn serves_valid_records_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(
        dir.path(),
        concat!(
            r#"{"task_id":"1","task":"A","agent":"X","status":"Error"}"#,
            "\n",
            "garbage\n",
            r#"{"task_id":"2"}"#,
            "\n",
            "\n",
            r#"{"task_id":"3","task":"C","agent":"Z","status":"In Progress","unknown":1}"#,
            "\n",
        ),
    );
    let base = spawn_daemon(feed).await;

    let resp = client().get(format!("{base}/api/tasks")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(
        resp.headers().get(reqwest::header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    assert_eq!(resp.headers().get(SKIPPED_LINES_HEADER).unwrap(), "1");

    let body: serde_json::Value = resp.json().await.unwrap();
    let records = body.as_array().unwrap();
    let ids: Vec<_> = records.iter().map(|r| r["task_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(records[1], serde_json::json!({"task_id": "2"}));
    assert!(records[2].get("unknown").is_none());
}

#[tokio::test]
async fn empty_feed_is_an_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path(), "\n  \n");
    let base = spawn_daemon(feed).await;

    let resp = client().get(format!("{base}/api/tasks")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn missing_feed_is_a_generic_500() {
    let dir = tempfile::tempdir().unwrap();
    let feed = dir.path().join("secret-location").join("tasks.json");
    let base = spawn_daemon(feed.clone()).await;

    let resp = client().get(format!("{base}/api/tasks")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    let text = resp.text().await.unwrap();
    assert!(!text.contains("secret-location"));
    assert!(!text.contains(&dir.path().display().to_string()));

    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["error"], "Failed to read tasks");
}

#[tokio::test]
async fn feed_is_reread_on_every_request() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path(), "{\"task_id\":\"1\"}\n");
    let base = spawn_daemon(feed.clone()).await;
    let client = client();

    let first: Vec<serde_json::Value> = client
        .get(format!("{base}/api/tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first.len(), 1);

    write_feed(dir.path(), "{\"task_id\":\"1\"}\n{\"task_id\":\"2\"}\n");
    let second: Vec<serde_json::Value> = client
        .get(format!("{base}/api/tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second.len(), 2);
}

#[tokio::test]
async fn healthz_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_daemon(dir.path().join("tasks.json")).await;

    let resp = client().get(format!("{base}/healthz")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}
