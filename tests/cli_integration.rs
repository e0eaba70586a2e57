//! Binary-level end-to-end tests.
//!
//! These run the real `fw` binary, including the process-replacement exec
//! of the final chain step (which happens safely inside the spawned child).
//! `FORGEWRAP_GIT` redirects the forward target so tests can observe
//! exactly what would have been run without touching a real repository.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The fw binary with config lookup isolated from the host environment.
fn fw() -> Command {
    let mut cmd = Command::cargo_bin("fw").unwrap();
    cmd.env("FORGEWRAP_CONFIG", "/nonexistent/forgewrap-config.toml");
    cmd.env_remove("FORGEWRAP_GIT");
    cmd.env_remove("FORGEWRAP_DEBUG");
    cmd.env_remove("BROWSER");
    cmd
}

fn run_git(dir: &Path, args: &[&str]) {
    let status = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// A git repository with a github remote, for browse/compare tests.
fn repo_with_remote() -> TempDir {
    let dir = TempDir::new().unwrap();
    run_git(dir.path(), &["init", "-b", "main"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    run_git(dir.path(), &["config", "user.name", "Test User"]);
    std::fs::write(dir.path().join("f"), "x\n").unwrap();
    run_git(dir.path(), &["add", "f"]);
    run_git(dir.path(), &["commit", "-m", "initial"]);
    run_git(
        dir.path(),
        &["remote", "add", "origin", "https://github.com/octo/demo.git"],
    );
    dir
}

#[test]
fn unregistered_commands_forward_verbatim() {
    // Pointing the "git" executable at echo makes the forward observable.
    fw().env("FORGEWRAP_GIT", "echo")
        .args(["status", "-sb", "--porcelain"])
        .assert()
        .success()
        .stdout("status -sb --porcelain\n");
}

#[test]
fn forward_exit_code_propagates() {
    fw().env("FORGEWRAP_GIT", "false")
        .arg("anything")
        .assert()
        .code(1);
}

#[test]
fn missing_git_program_reports_spawn_failure() {
    fw().env("FORGEWRAP_GIT", "definitely-not-a-real-program-xyz")
        .arg("status")
        .assert()
        .code(127)
        .stderr(predicate::str::contains("failed to start"));
}

#[test]
fn version_runs_git_then_reports_itself() {
    fw().args(["version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git version").and(predicate::str::contains("fw version")));
}

#[test]
fn version_flag_is_a_spelling_of_the_command() {
    fw().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fw version"));
}

#[test]
fn bare_invocation_prints_usage() {
    fw().assert()
        .success()
        .stdout(predicate::str::contains("usage: fw <command>"));
}

#[test]
fn parse_errors_fail_before_anything_runs() {
    fw().args(["browse", "--nonexist", "one"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown flag: '--nonexist'"));
}

#[test]
fn browse_url_prints_the_project_page() {
    let repo = repo_with_remote();
    fw().current_dir(repo.path())
        .args(["browse", "-u"])
        .assert()
        .success()
        .stdout("https://github.com/octo/demo\n");
}

#[test]
fn browse_url_maps_subpages() {
    let repo = repo_with_remote();
    fw().current_dir(repo.path())
        .args(["browse", "-u", "issues"])
        .assert()
        .success()
        .stdout("https://github.com/octo/demo/issues\n");
}

#[test]
fn compare_url_defaults_to_the_current_branch() {
    let repo = repo_with_remote();
    fw().current_dir(repo.path())
        .args(["compare", "-u"])
        .assert()
        .success()
        .stdout("https://github.com/octo/demo/compare/main\n");
}

#[test]
fn compare_without_a_project_aborts() {
    let dir = TempDir::new().unwrap();
    run_git(dir.path(), &["init", "-b", "main"]);
    fw().current_dir(dir.path())
        .args(["compare", "-u"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn debug_mode_echoes_chain_entries() {
    fw().env("FORGEWRAP_GIT", "echo")
        .env("FORGEWRAP_DEBUG", "1")
        .arg("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("[debug] exec: echo status"));
}
