//! End-to-end smoke tests for the `watchlist` binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{auth_body, temp_config_file};

fn watchlist() -> Command {
    let mut cmd = Command::cargo_bin("watchlist").expect("binary built");
    cmd.env_remove("WATCHLIST_API_URL")
        .env_remove("WATCHLIST_STORAGE_BACKEND")
        .env_remove("WATCHLIST_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    watchlist()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("watchlist"))
        .stdout(predicate::str::contains("--ephemeral"));
}

#[test]
fn test_whoami_without_session() {
    watchlist()
        .args(["--ephemeral", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_whoami_json_without_session() {
    watchlist()
        .args(["--ephemeral", "--json", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn test_logout_without_session_succeeds() {
    watchlist()
        .args(["--ephemeral", "logout"])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_dir, config_path) = temp_config_file("api:\n  base_url: ftp://example.com\n");
    watchlist()
        .args(["--config", config_path.to_str().expect("utf8 path"), "--ephemeral", "whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_against_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("T1")))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        watchlist()
            .args(["--ephemeral", "--api-url", uri.as_str(), "login", "-e", "a@x.com"])
            .env("WATCHLIST_PASSWORD", "pw")
            .output()
            .expect("run binary")
    })
    .await
    .expect("join");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Signed in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_session_prints_login_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/watchlist"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        watchlist()
            .args(["--ephemeral", "--api-url", uri.as_str(), "watchlist", "list"])
            .output()
            .expect("run binary")
    })
    .await
    .expect("join");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("watchlist login"));
}
