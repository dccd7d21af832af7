use assert_cmd::Command;
use predicates::prelude::*;
use std::net::TcpListener;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_linkey_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("linkey")
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::new(get_linkey_bin());
    cmd.args(["serve", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--public-dir"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_serve_logs_startup_and_reports_bind_failure() {
    let home = tempfile::tempdir().unwrap();
    let state = tempfile::tempdir().unwrap();
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port().to_string();

    Command::new(get_linkey_bin())
        .env("LINKEY_HOME", home.path())
        .env("LINKEY_STATE_DIR", state.path())
        .args(["serve", "--port", &port])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("Starting Linkey on port {}", port)))
        .stderr(predicate::str::contains("Failed to bind"));
}
