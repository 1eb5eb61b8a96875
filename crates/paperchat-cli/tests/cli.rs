//! Integration tests for the paperchat CLI commands.
//!
//! Commands that talk to the network are pointed at stub servers on localhost.

use std::path::PathBuf;

use assert_cmd::Command;
use axum::{
  routing::{get, post},
  Json, Router,
};
use predicates::prelude::*;
use serial_test::serial;
use tempfile::tempdir;

const FEED: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/2101.00001v1</id>
    <title>A Study of X</title>
    <summary>We study X.</summary>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2101.00002v1</id>
    <title>Notes on Y</title>
    <summary>Y, briefly.</summary>
  </entry>
</feed>"#;

// Helper function to create a clean command instance with an isolated config file
fn paperchat(dir: &tempfile::TempDir) -> Command {
  let mut cmd = Command::cargo_bin("paperchat").unwrap();
  cmd.arg("--config").arg(dir.path().join("config.toml"));
  cmd
}

// Helper to serve a stub backend on a free local port
async fn stub() -> String {
  let router = Router::new()
    .route("/info", get(|| async { FEED }))
    .route(
      "/download-arxiv-pdf",
      post(|Json(body): Json<serde_json::Value>| async move {
        Json(serde_json::json!({ "message": format!("fetched {}", body["arXiv_id"]) }))
      }),
    );
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
  format!("http://{addr}")
}

#[test]
fn test_help_lists_commands() {
  let dir = tempdir().unwrap();
  paperchat(&dir)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("search"))
    .stdout(predicate::str::contains("chat"))
    .stdout(predicate::str::contains("download"))
    .stdout(predicate::str::contains("relay"));
}

#[test]
#[serial]
fn test_init_writes_config() {
  let dir = tempdir().unwrap();
  let path: PathBuf = dir.path().join("nested").join("config.toml");

  paperchat(&dir)
    .arg("init")
    .arg("--path")
    .arg(&path)
    .assert()
    .success()
    .stdout(predicate::str::contains("Config written successfully"));

  let written = std::fs::read_to_string(&path).unwrap();
  assert!(written.contains("[search]"));
  assert!(written.contains("export.arxiv.org"));

  // Existing file is replaced without prompting
  paperchat(&dir)
    .arg("init")
    .arg("--path")
    .arg(&path)
    .arg("--accept-defaults")
    .assert()
    .success()
    .stdout(predicate::str::contains("already exists"))
    .stdout(predicate::str::contains("Config written successfully"));

  dir.close().unwrap();
}

#[test]
fn test_invalid_config_fails() {
  let dir = tempdir().unwrap();
  std::fs::write(dir.path().join("config.toml"), "[search]\nmax_results = \"lots\"\n").unwrap();

  paperchat(&dir).arg("search").arg("x").assert().failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_through_relay() {
  let base = stub().await;
  let dir = tempdir().unwrap();

  paperchat(&dir)
    .arg("search")
    .arg("x")
    .arg("--relay")
    .arg("--relay-url")
    .arg(format!("{base}/info"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Found"))
    .stdout(predicate::str::contains("A Study of X"))
    .stdout(predicate::str::contains("Notes on Y"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_failure_is_empty() {
  let dir = tempdir().unwrap();

  // Nothing listens on the discard port
  paperchat(&dir)
    .arg("search")
    .arg("x")
    .arg("--relay")
    .arg("--relay-url")
    .arg("http://127.0.0.1:9/info")
    .assert()
    .success()
    .stdout(predicate::str::contains("No papers found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download() {
  let base = stub().await;
  let dir = tempdir().unwrap();

  paperchat(&dir)
    .arg("download")
    .arg("https://arxiv.org/abs/2101.00001")
    .arg("--download-url")
    .arg(format!("{base}/download-arxiv-pdf"))
    .assert()
    .success()
    .stdout(predicate::str::contains("2101.00001"))
    .stdout(predicate::str::contains("Download requested"));
}

#[test]
fn test_download_without_identifier() {
  let dir = tempdir().unwrap();

  paperchat(&dir)
    .arg("download")
    .arg("https://arxiv.org/pdf/2101.00001")
    .assert()
    .success()
    .stdout(predicate::str::contains("No arXiv identifier"));
}
