// tests/integration_test.rs
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn tagger() -> Command {
    let mut cmd = Command::cargo_bin("version-tagger").expect("binary should build");
    // Keep the runner's own GitHub variables out of the test
    cmd.env_clear();
    cmd
}

#[test]
fn test_version_tagger_help() {
    tagger()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("version-tagger"))
        .stdout(predicate::str::contains("Tag and release the version"))
        .stdout(predicate::str::contains("--tag-format"));
}

#[test]
fn test_version_tagger_version() {
    tagger()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unreleased_version_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("package.json");
    let output = dir.path().join("github_output");
    fs::write(&source, "{ \"version\": \"0.0.0\" }\n").unwrap();

    tagger()
        .env("INPUT_API_TOKEN", "token")
        .env("INPUT_SOURCE_FILE", &source)
        .env(
            "INPUT_VERSION_PATTERN",
            r#""version"\s*:\s*"(?<version>[0-9.]+)""#,
        )
        .env("INPUT_TAG_FORMAT", "v{version}")
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_OUTPUT", &output)
        .assert()
        .success()
        .stdout(predicate::str::contains("not released yet"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "version=0.0.0\n");
}

#[test]
fn test_missing_source_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    tagger()
        .args(["--api-token", "token", "--repository", "octo/widgets"])
        .arg("--source-file")
        .arg(dir.path().join("missing.json"))
        .args(["--version-pattern", "(?<version>.+)"])
        .args(["--commit-sha", "abc123"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Source file not found"));
}

#[test]
fn test_missing_token_fails() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("VERSION");
    fs::write(&source, "1.2.3\n").unwrap();

    tagger()
        .arg("--source-file")
        .arg(&source)
        .args(["--version-pattern", "(?<version>.+)", "--repository", "octo/widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_token is required"));
}

#[test]
fn test_invalid_repository_fails() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("VERSION");
    fs::write(&source, "1.2.3\n").unwrap();

    tagger()
        .arg("--source-file")
        .arg(&source)
        .args(["--version-pattern", "(?<version>.+)"])
        .args(["--api-token", "token", "--repository", "widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected owner/name"));
}

#[test]
fn test_failed_run_still_writes_version() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("VERSION");
    let output = dir.path().join("github_output");
    fs::write(&source, "2.3.0\n").unwrap();

    // Nothing listens on the discard port, so listing tags fails
    tagger()
        .env("INPUT_API_TOKEN", "token")
        .env("INPUT_SOURCE_FILE", &source)
        .env("INPUT_VERSION_PATTERN", "(?<version>[0-9.]+)")
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_SHA", "abc123")
        .env("GITHUB_API_URL", "http://127.0.0.1:9")
        .env("GITHUB_OUTPUT", &output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to fetch tags"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "version=2.3.0\n");
}
