//! End-to-end CLI tests for the dirgrab binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a command isolated from the caller's config directory.
fn dirgrab(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dirgrab").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG");
    cmd
}

async fn setup_listing() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="../">up</a><a href="a.pdf">a</a><a href="page.html">p</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/a.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
        .mount(&server)
        .await;

    server
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let home = TempDir::new().unwrap();
    dirgrab(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("directory listing"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let home = TempDir::new().unwrap();
    dirgrab(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dirgrab"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let home = TempDir::new().unwrap();
    dirgrab(home.path())
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that a malformed config file aborts before any network activity.
#[test]
fn test_binary_bad_config_file_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "threads = 8\n").unwrap();

    dirgrab(home.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

/// Test that an unreachable listing is not fatal.
#[test]
fn test_binary_unreachable_listing_exits_zero() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out");

    dirgrab(home.path())
        .args(["-q", "--connect-timeout", "2", "--base-url", "http://127.0.0.1:9/"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(out.is_dir());
}

/// Test a full run against a mock listing server.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_downloads_listed_files() {
    let server = setup_listing().await;
    let home = TempDir::new().unwrap();
    let out = home.path().join("Assets");
    let base_url = format!("{}/files/", server.uri());

    let (home, out) = tokio::task::spawn_blocking(move || {
        dirgrab(home.path())
            .args(["--base-url", &base_url])
            .arg("-o")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Downloaded a.pdf"))
            .stdout(predicate::str::contains("page.html").not());
        (home, out)
    })
    .await
    .unwrap();

    assert_eq!(std::fs::read(out.join("a.pdf")).unwrap(), b"%PDF-1.4");
    assert!(!out.join("page.html").exists());
    drop(home);
}

/// Test that sanitize options from the config file are applied.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_config_file_sanitize() {
    let server = setup_listing().await;
    let home = TempDir::new().unwrap();
    let out = home.path().join("Assets");
    let config_dir = home.path().join("dirgrab");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "base_url = \"{}/files/\"\nsanitize = true\nforced_extension = \"bin\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let (home, out) = tokio::task::spawn_blocking(move || {
        dirgrab(home.path())
            .arg("-o")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Downloaded a_pdf.bin"));
        (home, out)
    })
    .await
    .unwrap();

    assert!(out.join("a_pdf.bin").is_file());
    drop(home);
}
