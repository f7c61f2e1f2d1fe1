//! Git repository discovery
//!
//! This module provides the GitRepository wrapper around git2::Repository.
//! Opening a repository means finding it by walking up from a starting
//! directory, insisting on a working tree, and normalizing the working tree
//! root into a path the native `git` executable accepts.

use crate::error::{convert_git2_error, GitError, GitResult};
use crate::platform::{normalize_root, Cygpath, PathTranslator};
use git2::Repository;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Wrapper around git2::Repository with a resolved working tree root
pub struct GitRepository {
    /// The underlying git2 repository
    repo: Repository,
    /// Normalized working tree root
    root: PathBuf,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GitRepository {
    /// Open the git repository enclosing `path`
    ///
    /// Searches `path` and then each parent directory. Bare repositories are
    /// rejected because nothing can be spawned inside them.
    pub fn open<P: AsRef<Path>>(path: P) -> GitResult<Self> {
        Self::open_with_translator(path, &Cygpath)
    }

    /// Open the repository enclosing `path` using a specific path translator
    pub fn open_with_translator<P: AsRef<Path>>(
        path: P,
        translator: &dyn PathTranslator,
    ) -> GitResult<Self> {
        let path = path.as_ref();
        debug!("Opening git repository at: {}", path.display());

        let repo = Repository::discover(path).map_err(|e| {
            let error_msg = match e.code() {
                git2::ErrorCode::NotFound => {
                    "no repository in this directory or any parent".to_string()
                }
                git2::ErrorCode::Invalid => {
                    "the repository may be corrupted".to_string()
                }
                _ => format!("git2 error: {}", e),
            };

            warn!("Repository open failed: {}", error_msg);
            GitError::repository_not_found(path, error_msg)
        })?;

        let workdir = match repo.workdir() {
            Some(workdir) => workdir.to_path_buf(),
            None => {
                warn!("Repository at {} has no working tree", path.display());
                return Err(GitError::bare_repository(path));
            }
        };

        let root = normalize_root(&workdir.to_string_lossy(), translator)?;

        debug!("Successfully opened repository at: {}", root.display());

        Ok(Self { repo, root })
    }

    /// Open the repository enclosing the process's current directory
    pub fn locate() -> GitResult<Self> {
        let current_dir =
            std::env::current_dir().map_err(|source| GitError::CurrentDirectory { source })?;
        Self::open(current_dir)
    }

    /// Initialize a new git repository with a working tree
    pub fn init<P: AsRef<Path>>(path: P) -> GitResult<Self> {
        let path = path.as_ref();
        debug!("Initializing git repository at: {}", path.display());

        Repository::init(path).map_err(|e| convert_git2_error("init_repository", e))?;
        Self::open(path)
    }

    /// Get the underlying git2::Repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Normalized working tree root
    pub fn root(&self) -> &Path {
        &self.root
    }
}
