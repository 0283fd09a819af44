//! End-to-end tests of the jsearch binary

use assert_cmd::Command;
use serde_json::json;
use std::fs;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary with a clean environment, running inside `dir`
fn jsearch(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jsearch").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("JSEARCH_API_KEY")
        .env_remove("JSEARCH_API_HOST")
        .env_remove("JSEARCH_MAX_RETRIES")
        .env_remove("JSEARCH_RETRY_DELAY")
        .env_remove("JSEARCH_REQUEST_TIMEOUT")
        .env_remove("JSEARCH_RATE_LIMIT_DELAY")
        .env_remove("JSEARCH_OUTPUT_DIR")
        .env_remove("JSEARCH_METRICS_ADDR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = jsearch(&dir).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["search", "preset", "details", "salary", "company-salary", "compare"] {
        assert!(stdout.contains(command), "help should mention {command}");
    }
}

#[test]
fn test_missing_api_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = jsearch(&dir).args(["search", "rust"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key not configured"), "stderr: {stderr}");
}

#[test]
fn test_preset_list_needs_no_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = jsearch(&dir)
        .args(["preset", "--list", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let presets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(presets.as_array().map(Vec::len), Some(9));
    assert_eq!(presets[0]["key"], "project-manager-es");
}

#[test]
fn test_unknown_preset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = jsearch(&dir)
        .args(["preset", "no-such-preset", "--api-key", "k"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn test_out_of_range_options_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let output = jsearch(&dir)
        .args(["search", "rust", "--api-key", "k", "--max-retries", "20"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let output = jsearch(&dir)
        .args(["search", "rust", "--api-key", "k", "--rate-limit-delay", "10"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("rate_limit_delay"));
}

#[test]
fn test_invalid_country_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = jsearch(&dir)
        .args(["search", "rust", "--api-key", "k", "--country", "usa"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_search_against_mock_server_with_export() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jsearch/search"))
        .and(header("x-api-key", "cli-key"))
        .and(query_param("query", "rust developer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": [
                {"job_id": "1", "job_title": "Rust Developer", "job_is_remote": true},
                {"job_id": "2", "job_title": "Onsite Developer", "job_is_remote": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = jsearch(&dir);
    cmd.args([
        "search",
        "rust developer",
        "--api-key",
        "cli-key",
        "--api-host",
        &server.uri(),
        "--rate-limit-delay",
        "0.1",
        "--format",
        "json",
        "--remote-only",
        "--export",
        "csv",
        "--output-dir",
        "exports",
    ]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let jobs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(jobs.as_array().map(Vec::len), Some(1));
    assert_eq!(jobs[0]["job_id"], "1");

    let exports: Vec<_> = fs::read_dir(dir.path().join("exports"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(exports.len(), 1);
    assert!(exports[0].starts_with("rust_developer_") && exports[0].ends_with(".csv"));
}
