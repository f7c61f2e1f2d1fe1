//! Subcommand dispatch against a real repository

use git2::{Repository, Signature};
use stackpr_cli::{exit_code, Commands, Session};
use stackpr_config::Config;
use stackpr_git::GitRepository;
use std::path::Path;
use tempfile::TempDir;

fn setup() -> (TempDir, Session) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo = Repository::init(temp_dir.path()).expect("Failed to init repository");
    repo.set_head("refs/heads/main").unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    std::fs::write(temp_dir.path().join("README.md"), "# Stack\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README.md")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now("Test User", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &signature, &signature, "Initial commit", &tree, &[])
        .unwrap();

    let repository = GitRepository::open(temp_dir.path()).unwrap();
    let mut session = Session::with_config(Config::default(), repository);
    session.git().set_diagnostics_sink(std::io::sink());
    (temp_dir, session)
}

fn dispatch(session: &mut Session, command: Commands) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = session.dispatch(command, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn git(args: &[&str], capture: bool, strict: bool) -> Commands {
    Commands::Git {
        capture,
        editor: None,
        strict,
        args: args.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_branch_prints_short_name() {
    let (_temp_dir, mut session) = setup();
    let (result, out) = dispatch(&mut session, Commands::Branch);
    result.unwrap();
    assert_eq!(out, "main\n");
}

#[test]
fn test_root_prints_working_tree() {
    let (temp_dir, mut session) = setup();
    let (result, out) = dispatch(&mut session, Commands::Root);
    result.unwrap();

    let printed = std::fs::canonicalize(out.trim()).unwrap();
    assert_eq!(printed, std::fs::canonicalize(temp_dir.path()).unwrap());
}

#[test]
fn test_config_prints_yaml() {
    let (_temp_dir, mut session) = setup();
    let (result, out) = dispatch(&mut session, Commands::Config);
    result.unwrap();

    let parsed: Config = serde_yaml_ng::from_str(&out).unwrap();
    assert_eq!(&parsed, session.config());
    assert!(out.contains("github_remote: origin"));
}

#[test]
fn test_git_capture_prints_output() {
    let (_temp_dir, mut session) = setup();
    let (result, out) = dispatch(&mut session, git(&["log", "--format=%s"], true, false));
    result.unwrap();
    assert_eq!(out, "Initial commit\n");
}

#[test]
fn test_git_without_capture_prints_nothing() {
    let (_temp_dir, mut session) = setup();
    let (result, out) = dispatch(&mut session, git(&["status"], false, false));
    result.unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_git_failure_is_recoverable_unless_strict() {
    let (_temp_dir, mut session) = setup();

    let (result, _) = dispatch(&mut session, git(&["rev-parse", "missing-ref"], false, false));
    assert_eq!(exit_code(&result.unwrap_err()), 1);

    let (result, _) = dispatch(&mut session, git(&["rev-parse", "missing-ref"], false, true));
    assert_eq!(exit_code(&result.unwrap_err()), 2);
}

#[test]
fn test_delete_remote_without_remote_fails() {
    let (_temp_dir, mut session) = setup();
    let (result, out) = dispatch(
        &mut session,
        Commands::DeleteRemote {
            branch: "feature-1".to_string(),
        },
    );

    let error = result.unwrap_err();
    assert!(format!("{:#}", error).contains("origin"));
    assert_eq!(exit_code(&error), 1);
    assert!(out.is_empty());
}
