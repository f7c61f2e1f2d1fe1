//! Exit codes and output of the `stackpr` binary

use assert_cmd::Command;
use git2::{Repository, Signature};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn committed_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();
    repo.set_head("refs/heads/main").unwrap();

    std::fs::write(temp_dir.path().join("README.md"), "# Stack\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README.md")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now("Test User", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &signature, &signature, "Initial commit", &tree, &[])
        .unwrap();
    temp_dir
}

fn stackpr(dir: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stackpr").unwrap();
    cmd.current_dir(dir)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("STACKPR_NOREBASE");
    cmd
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    stackpr(home.path(), home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("stackpr "));
}

#[test]
fn test_outside_repository_is_fatal() {
    let home = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    stackpr(outside.path(), home.path())
        .arg("branch")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn test_branch_in_repository() {
    let home = TempDir::new().unwrap();
    let repo = committed_repo();
    stackpr(repo.path(), home.path())
        .arg("branch")
        .assert()
        .success()
        .stdout("main\n");
}

#[test]
fn test_failing_git_command_exit_codes() {
    let home = TempDir::new().unwrap();
    let repo = committed_repo();

    stackpr(repo.path(), home.path())
        .args(["git", "rev-parse", "missing-ref"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("git error:"));

    stackpr(repo.path(), home.path())
        .args(["git", "--strict", "rev-parse", "missing-ref"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fatal:"));
}

#[test]
fn test_repository_config_file_is_honored() {
    let home = TempDir::new().unwrap();
    let repo = committed_repo();
    std::fs::write(
        repo.path().join(".stackpr.yml"),
        "repo:\n  github_remote: upstream\n",
    )
    .unwrap();

    stackpr(repo.path(), home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("github_remote: upstream"));
}

#[test]
fn test_rebase_suppressed_by_environment() {
    let home = TempDir::new().unwrap();
    let repo = committed_repo();

    stackpr(repo.path(), home.path())
        .env("STACKPR_NOREBASE", "")
        .args(["git", "rebase", "no-such-upstream"])
        .assert()
        .success();
}
