//! stackpr Git Execution Layer
//!
//! This crate turns high-level intents from the stack orchestrator into
//! non-interactive `git` invocations, and answers the few questions about the
//! repository that need a typed answer.
//!
//! ## Features
//!
//! - **Repository location**: discovery from any subdirectory, bare
//!   repositories rejected, `/cygdrive` roots translated to native paths
//! - **Non-interactive commands**: editor and sequence editor replaced by a
//!   no-op, `EDITOR` stripped from the child environment
//! - **Rebase suppression**: by configuration or `STACKPR_NOREBASE`
//! - **Remote branch lifecycle**: typed deletion via git2 refspec push
//! - **Testability**: process spawning behind [`CommandRunner`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use stackpr_git::{GitCmd, GitSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut git = GitCmd::locate(GitSettings::default())?;
//! let mut log = String::new();
//! git.execute("log --format=%H -n 1", Some(&mut log))?;
//! git.execute("rebase -i --autosquash origin/main", None)?;
//! println!("on {} at {}", git.current_branch_short_name()?, log);
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod command;
pub mod environment;
pub mod error;
pub mod executor;
pub mod platform;
pub mod policy;
pub mod remote;
pub mod repository;
pub mod types;

// Re-export main types
pub use cmd::{GitCmd, GitSettings, DEFAULT_REMOTE};
pub use command::{build_arguments, CommandInvocation, DEFAULT_EDITOR};
pub use environment::Environment;
pub use error::{GitError, GitResult};
pub use executor::{CommandOutput, CommandRunner, ProcessRunner};
pub use platform::{Cygpath, PathTranslator};
pub use policy::{RebasePolicy, NO_REBASE_ENV};
pub use repository::GitRepository;
pub use types::BranchName;
