//! Integration tests for the gitglance binary.
//!
//! These exercise the full command flow against real repositories.

use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn make_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    run_git(dir.path(), &["init", "-b", "main"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    run_git(dir.path(), &["config", "user.name", "Test User"]);
    std::fs::write(dir.path().join("README.txt"), "hello\n").unwrap();
    run_git(dir.path(), &["add", "README.txt"]);
    run_git(dir.path(), &["commit", "-m", "Initial commit"]);
    dir
}

fn gitglance() -> Command {
    Command::cargo_bin("gitglance").expect("binary builds")
}

#[test]
fn status_prints_summary_line() {
    let repo = make_repo();

    gitglance()
        .args(["--cwd"])
        .arg(repo.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Branch: main | +0 ~0 -0 | +0 ~0 -0",
        ));
}

#[test]
fn status_fails_outside_a_repository() {
    let dir = TempDir::new().unwrap();

    gitglance()
        .args(["--cwd"])
        .arg(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not inside a Git repository"));
}

#[test]
fn props_emits_json_with_status_key() {
    let repo = make_repo();

    gitglance()
        .args(["--cwd"])
        .arg(repo.path())
        .args(["props", "README.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("System.VersionControl.Status"))
        .stdout(predicate::str::contains(
            "System.VersionControl.LastChangeID",
        ));
}

#[test]
fn props_omits_unknown_identifiers() {
    let repo = make_repo();

    gitglance()
        .args(["--cwd"])
        .arg(repo.path())
        .args([
            "props",
            "README.txt",
            "-p",
            "System.VersionControl.NoSuchProperty",
            "-p",
            "System.VersionControl.Status",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("NoSuchProperty").not())
        .stdout(predicate::str::contains("System.VersionControl.Status"));
}

#[test]
fn completion_generates_script() {
    gitglance()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitglance"));
}
