//! Integration tests for configuration handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn policymap_cmd() -> Command {
    let mut cmd = Command::cargo_bin("policymap").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");

    policymap_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chunking:"))
        .stdout(predicate::str::contains("length: 64"))
        .stdout(predicate::str::contains("overlap: 16"))
        .stdout(predicate::str::contains("api_key").not());
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yml");

    policymap_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    policymap_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("already exists"));

    policymap_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_invalid_chunking_config_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, "chunking:\n  length: 8\n  overlap: 8\n").unwrap();

    policymap_cmd()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("chunk")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("overlap"));
}

#[test]
fn test_ask_requires_prompt() {
    policymap_cmd().arg("ask").assert().failure();
}
