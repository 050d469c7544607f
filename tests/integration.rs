//! Integration tests for the shelltoken binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test config file.
fn create_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

/// Get a command with config path set via env var.
fn cmd_with_config(config_path: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shelltoken");
    cmd.env("SHELLTOKEN_CONFIG", config_path);
    cmd
}

/// Get a command that sees no user config.
fn cmd_without_config(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shelltoken");
    cmd.env("SHELLTOKEN_CONFIG", home.path().join("nonexistent.toml"));
    cmd
}

#[test]
fn test_split_raw_command() {
    let dir = TempDir::new().unwrap();
    cmd_without_config(&dir)
        .write_stdin("ENV1=1 ENV2=2 ./test arg1 'arg 2'\n")
        .assert()
        .success()
        .stdout(r#"{"env":["ENV1=1","ENV2=2"],"argv":["./test","arg1","arg 2"]}"#.to_string() + "\n");
}

#[test]
fn test_split_json_request() {
    let dir = TempDir::new().unwrap();
    let input = r#"{"command":"c:\\\"Program Files\"\\bs.exe /q","profile":"windows"}"#;
    cmd_without_config(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""argv":["c:\\Program Files\\bs.exe","/q"]"#));
}

#[test]
fn test_empty_command() {
    let dir = TempDir::new().unwrap();
    cmd_without_config(&dir)
        .write_stdin(r#"{"command":""}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"env":[],"argv":[""]}"#));
}

#[test]
fn test_reject_shell_characters() {
    let dir = TempDir::new().unwrap();
    cmd_without_config(&dir)
        .write_stdin(r#"{"command":"test \"$(ls)\""}"#)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("shell metacharacter found at position 6"));
}

#[test]
fn test_single_quotes_allow_shell_characters() {
    let dir = TempDir::new().unwrap();
    cmd_without_config(&dir)
        .write_stdin("test '$(ls)'")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""argv":["test","$(ls)"]"#));
}

#[test]
fn test_reject_unbalanced_quotes() {
    let dir = TempDir::new().unwrap();
    cmd_without_config(&dir)
        .write_stdin("test 'arg1 arg2")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unbalanced quotes"));
}

#[test]
fn test_unknown_profile() {
    let dir = TempDir::new().unwrap();
    cmd_without_config(&dir)
        .write_stdin(r#"{"command":"ls","profile":"fish"}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown profile 'fish'"));
}

#[test]
fn test_missing_command_field() {
    let dir = TempDir::new().unwrap();
    cmd_without_config(&dir)
        .write_stdin(r#"{"profile":"linux"}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing required field: command"));
}

#[test]
fn test_custom_profile_reports_shell_character() {
    let dir = TempDir::new().unwrap();
    let config = create_config(
        &dir,
        r#"
default_profile = "lenient"

[profiles.lenient]
trim = true
shell_characters = "continue_and_report"
"#,
    );

    cmd_with_config(&config)
        .write_stdin("PATH=test:$PATH ./run")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""env":["PATH=test:$PATH"]"#))
        .stdout(predicate::str::contains(r#""shell_character":10"#));
}

#[test]
fn test_custom_separators_profile() {
    let dir = TempDir::new().unwrap();
    let config = create_config(
        &dir,
        r#"
[profiles.pipeline]
separators = ";|"
keep_separators = true
keep_quotes = true
keep_backslashes = true
"#,
    );

    cmd_with_config(&config)
        .write_stdin(r#"{"command":"ls | grep -v ; echo ';'","profile":"pipeline"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""argv":["ls ","|"," grep -v ",";"," echo ';'"]"#,
        ));
}

#[test]
fn test_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, "this is not valid toml [[[");

    cmd_with_config(&config)
        .write_stdin("ls")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_project_config() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(".shelltoken.toml"),
        "default_profile = \"windows\"\n",
    )
    .unwrap();

    let input = format!(
        r#"{{"command":"dir c:\\temp","cwd":{}}}"#,
        serde_json::to_string(project.path().to_str().unwrap()).unwrap()
    );

    cmd_without_config(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""argv":["dir","c:\\temp"]"#));
}

#[test]
fn test_audit_log() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("audit.jsonl");
    let config = create_config(
        &dir,
        &format!(
            "[audit]\nenabled = true\npath = {}\n",
            toml_string(log_path.to_str().unwrap())
        ),
    );

    cmd_with_config(&config)
        .write_stdin("DB_PASSWORD=hunter22 ./migrate up")
        .assert()
        .success();
    cmd_with_config(&config)
        .write_stdin("ls > out")
        .assert()
        .code(2);

    let log = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["profile"], "linux");
    assert_eq!(first["rejected"], false);
    assert_eq!(first["env"][0], "DB_PASSWORD=<REDACTED>");
    assert_eq!(first["command"], "./migrate");
    assert!(!lines[0].contains("hunter22"));

    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["rejected"], true);
    assert_eq!(second["error"], "shell metacharacter found at position 3");
}

fn toml_string(s: &str) -> String {
    format!("'{}'", s)
}
