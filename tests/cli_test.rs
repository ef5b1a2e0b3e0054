//! Integration tests for the runbook binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_steps(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("steps.yml");
    fs::write(&path, content).unwrap();
    (temp, path)
}

fn runbook() -> Command {
    let mut cmd = Command::new(cargo_bin("runbook"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

const GREETING: &str = r#"
name: Greeting
steps:
  - name: get name
    type: prompt
    query: "what is your name?"
    save_as: name
  - name: "greet ${name}"
    type: shell
    run: "echo hi ${name}"
    on_output:
      - echo: true
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    runbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("step files"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    runbook()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    runbook().assert().failure();
    Ok(())
}

#[cfg(unix)]
#[test]
fn run_answers_prompt_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = write_steps(GREETING);
    runbook()
        .arg("run")
        .arg(&path)
        .write_stdin("bob\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Greeting"))
        .stdout(predicate::str::contains("[0%] get name"))
        .stdout(predicate::str::contains("[50%] greet bob"))
        .stdout(predicate::str::contains("hi bob"))
        .stdout(predicate::str::contains("Completed 2 steps"))
        .stdout(predicate::str::contains("100%").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn run_quiet_hides_progress() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = write_steps(GREETING);
    runbook()
        .args(["run", "--quiet"])
        .arg(&path)
        .write_stdin("bob\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0%]").not())
        .stdout(predicate::str::contains("Completed").not());
    Ok(())
}

#[test]
fn run_fails_when_stdin_closes() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = write_steps(GREETING);
    runbook()
        .arg("run")
        .arg(&path)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("get name"));
    Ok(())
}

#[test]
fn run_spawn_failure_names_step() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = write_steps(
        r#"
steps:
  - name: missing tool
    type: shell
    command: /definitely/not/a/binary
  - name: never
    type: shell
    run: "echo should-not-run"
    on_output:
      - echo: true
"#,
    );
    runbook()
        .arg("run")
        .arg(&path)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing tool"))
        .stdout(predicate::str::contains("should-not-run").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn run_skips_false_conditions() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = write_steps(
        r#"
steps:
  - name: install xorg
    type: prompt
    query: "install xorg? (y/n):"
    default: "y"
    parse: bool
    save_as: xorg
  - name: xorg packages
    type: shell
    run: "echo installing-xorg"
    when: { key: xorg }
    on_output:
      - echo: true
  - name: headless
    type: shell
    run: "echo headless-setup"
    when: { key: xorg, not: true }
    on_output:
      - echo: true
"#,
    );
    runbook()
        .arg("run")
        .arg(&path)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("headless-setup"))
        .stdout(predicate::str::contains("installing-xorg").not());
    Ok(())
}

#[test]
fn run_missing_file_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    runbook()
        .args(["run", "/nonexistent/steps.yml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
    Ok(())
}

#[test]
fn run_invalid_file_reports_problem() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = write_steps("steps:\n  - {name: ask, type: prompt}\n");
    runbook()
        .arg("run")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("query"));
    Ok(())
}

#[test]
fn list_prints_steps() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = write_steps(GREETING);
    runbook()
        .arg("list")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [prompt] get name"))
        .stdout(predicate::str::contains("2. [shell] greet ${name}"));
    Ok(())
}
