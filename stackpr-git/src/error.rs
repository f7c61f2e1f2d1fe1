//! Git-specific error types and handling
//!
//! Errors fall into three groups. Startup errors (no repository, bare
//! repository, untranslatable root path) and strict-mode failures are fatal:
//! the binary terminates on them, the library never does. Command failures
//! carry the argument line and exit code. Remote lifecycle failures carry the
//! remote or branch name together with the underlying `git2` cause.

use std::path::PathBuf;
use stackpr_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for Git operations
pub type GitResult<T> = Result<T, GitError>;

/// Git error types
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitError {
    /// No repository encloses the starting directory
    #[error("{path} is not a git repository: {details}")]
    RepositoryNotFound { path: PathBuf, details: String },

    /// Repository found but it has no working tree
    #[error("{path} is a bare git repository")]
    BareRepository { path: PathBuf },

    /// The platform path helper could not translate the working tree root
    #[error("Failed to translate path '{path}': {details}")]
    PathTranslation { path: String, details: String },

    /// Current directory could not be read
    #[error("Failed to read current directory: {source}")]
    CurrentDirectory {
        #[source]
        source: std::io::Error,
    },

    /// The git process could not be started
    #[error("Failed to spawn 'git {command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The git process exited unsuccessfully
    #[error("git {command} failed{}", exit_suffix(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// A failure the caller declared unrecoverable
    #[error("fatal: {source}")]
    Fatal {
        #[source]
        source: Box<GitError>,
    },

    /// Configured remote does not exist
    #[error("getting remote {remote}: {source}")]
    RemoteNotFound {
        remote: String,
        #[source]
        source: git2::Error,
    },

    /// Remote branch deletion failed or was rejected
    #[error("removing remote branch {branch}: {details}")]
    RemoteBranchDelete {
        branch: String,
        details: String,
        #[source]
        source: Option<git2::Error>,
    },

    /// HEAD does not name a local branch
    #[error("getting HEAD: {details}")]
    Head {
        details: String,
        #[source]
        source: Option<git2::Error>,
    },

    /// Invalid branch name
    #[error("Invalid branch name '{name}': {reason}")]
    InvalidBranchName { name: String, reason: String },

    /// Git2 library error
    #[error("Git2 operation '{operation}' failed: {source}")]
    Git2Error {
        operation: String,
        #[source]
        source: git2::Error,
    },

    /// IO error during git operations
    #[error("IO error during git operation '{operation}': {source}")]
    IoError {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

impl GitError {
    /// Create a repository not found error
    pub fn repository_not_found<P: Into<PathBuf>>(path: P, details: String) -> Self {
        Self::RepositoryNotFound {
            path: path.into(),
            details,
        }
    }

    /// Create a bare repository error
    pub fn bare_repository<P: Into<PathBuf>>(path: P) -> Self {
        Self::BareRepository { path: path.into() }
    }

    /// Create a path translation error
    pub fn path_translation<S: Into<String>>(path: S, details: String) -> Self {
        Self::PathTranslation {
            path: path.into(),
            details,
        }
    }

    /// Create a command failed error
    pub fn command_failed<S: Into<String>>(command: S, code: Option<i32>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
        }
    }

    /// Create a spawn error
    pub fn spawn<S: Into<String>>(command: S, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Mark an error as unrecoverable
    ///
    /// Already-fatal errors are returned unchanged.
    pub fn into_fatal(self) -> Self {
        if self.is_fatal() {
            self
        } else {
            Self::Fatal {
                source: Box::new(self),
            }
        }
    }

    /// Create a remote not found error
    pub fn remote_not_found<S: Into<String>>(remote: S, source: git2::Error) -> Self {
        Self::RemoteNotFound {
            remote: remote.into(),
            source,
        }
    }

    /// Create a remote branch deletion error
    pub fn remote_branch_delete<S: Into<String>>(
        branch: S,
        details: String,
        source: Option<git2::Error>,
    ) -> Self {
        Self::RemoteBranchDelete {
            branch: branch.into(),
            details,
            source,
        }
    }

    /// Create a HEAD resolution error
    pub fn head(details: String, source: Option<git2::Error>) -> Self {
        Self::Head { details, source }
    }

    /// Create an invalid branch name error
    pub fn invalid_branch_name(name: String, reason: String) -> Self {
        Self::InvalidBranchName { name, reason }
    }

    /// Create a git2 error with operation context
    pub fn from_git2(operation: String, error: git2::Error) -> Self {
        Self::Git2Error {
            operation,
            source: error,
        }
    }

    /// Create an IO error with operation context
    pub fn from_io(operation: String, error: std::io::Error) -> Self {
        Self::IoError {
            operation,
            source: error,
        }
    }

    /// Whether the process cannot meaningfully continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GitError::RepositoryNotFound { .. }
                | GitError::BareRepository { .. }
                | GitError::PathTranslation { .. }
                | GitError::CurrentDirectory { .. }
                | GitError::Fatal { .. }
        )
    }
}

impl Severity for GitError {
    fn severity(&self) -> ErrorSeverity {
        if self.is_fatal() {
            ErrorSeverity::Critical
        } else {
            ErrorSeverity::Error
        }
    }
}

/// Convert git2::Error to GitError with operation context
pub fn convert_git2_error(operation: &str, error: git2::Error) -> GitError {
    GitError::from_git2(operation.to_string(), error)
}

/// Convert std::io::Error to GitError with operation context
pub fn convert_io_error(operation: &str, error: std::io::Error) -> GitError {
    GitError::from_io(operation.to_string(), error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_errors_are_fatal() {
        let errors = vec![
            GitError::repository_not_found("/tmp/nowhere", "not found".to_string()),
            GitError::bare_repository("/srv/repo.git"),
            GitError::path_translation("/cygdrive/c/work", "cygpath missing".to_string()),
        ];

        for error in errors {
            assert!(error.is_fatal(), "expected fatal: {}", error);
            assert_eq!(error.severity(), ErrorSeverity::Critical);
        }
    }

    #[test]
    fn test_command_failure_is_recoverable() {
        let error = GitError::command_failed("rebase main", Some(1));
        assert!(!error.is_fatal());
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.to_string(), "git rebase main failed with exit code 1");
    }

    #[test]
    fn test_command_failure_without_code() {
        let error = GitError::command_failed("status", None);
        assert_eq!(error.to_string(), "git status failed (terminated by signal)");
    }

    #[test]
    fn test_into_fatal_wraps_once() {
        let error = GitError::command_failed("push origin", Some(128)).into_fatal();
        assert!(error.is_fatal());
        assert_eq!(
            error.to_string(),
            "fatal: git push origin failed with exit code 128"
        );

        let again = error.into_fatal();
        assert!(matches!(
            again,
            GitError::Fatal { ref source } if matches!(**source, GitError::CommandFailed { .. })
        ));
    }

    #[test]
    fn test_remote_errors_name_their_subject() {
        let error = GitError::remote_not_found("upstream", git2::Error::from_str("no such remote"));
        assert!(error.to_string().contains("upstream"));

        let error =
            GitError::remote_branch_delete("feature-1", "not present on remote".to_string(), None);
        assert!(error.to_string().contains("feature-1"));
        assert!(!error.is_fatal());
    }
}
