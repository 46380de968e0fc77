use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn config_with_logging(root: &Path, logging: &str) -> String {
    format!(
        r###"
project_dir: "{}"
daily_note_name: daily.md
section: "## Notes"

logging:
{logging}
"###,
        root.join("vault").display()
    )
}

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("logs/markin.log");

    let config_path = root.join("config.yaml");
    let logging = format!("  level: debug\n  file: \"{}\"", log_file.display());
    fs::write(&config_path, config_with_logging(root, &logging)).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("markin"));
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config").arg(&config_path).args(["fl", "logged"]).assert().success();

    assert!(log_file.exists(), "Log file should be created");
    let log = fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("fleeting note added"), "{log}");
}

#[test]
fn test_logging_level_parsing() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let config_path = root.join("config.yaml");
    fs::write(&config_path, config_with_logging(root, "  level: TRACE")).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("markin"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();

    // If it didn't crash, the level parsing worked.
}

#[test]
fn test_logging_split_levels() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("split.log");

    let config_path = root.join("config.yaml");
    let logging = format!(
        "  level: error\n  file_level: debug\n  file: \"{}\"",
        log_file.display()
    );
    fs::write(&config_path, config_with_logging(root, &logging)).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("markin"));
    cmd.env_remove("RUST_LOG");
    let output = cmd
        .arg("--config")
        .arg(&config_path)
        .args(["fl", "quiet"])
        .assert()
        .success()
        .get_output()
        .clone();

    assert!(String::from_utf8_lossy(&output.stderr).is_empty());
    let log = fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("fleeting note added"), "{log}");
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let config_path = root.join("config.yaml");
    fs::write(&config_path, config_with_logging(root, "  level: error")).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("markin"));
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config")
        .arg(&config_path)
        .args(["--debug", "fl", "loud"])
        .assert()
        .success()
        .stderr(predicates::str::contains("fleeting note"));
}
