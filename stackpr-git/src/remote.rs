//! Remote branch lifecycle and branch identity
//!
//! These operations go through git2 rather than the `git` executable because
//! their callers act on the outcome (does the branch exist, was the push
//! accepted) and that outcome is available typed instead of as text.

use crate::error::{GitError, GitResult};
use crate::repository::GitRepository;
use crate::types::BranchName;
use git2::{PushOptions, RemoteCallbacks};
use tracing::{debug, info};

impl GitRepository {
    /// Delete `branch` from the remote named `remote_name`
    ///
    /// Pushes the refspec `:refs/heads/<branch>`. Fails if the remote is not
    /// configured, if it does not have the branch (detected while negotiating
    /// the push), or if it rejects the deletion.
    pub fn delete_remote_branch(&self, remote_name: &str, branch: &BranchName) -> GitResult<()> {
        debug!("Deleting branch {} on remote {}", branch, remote_name);

        let mut remote = self
            .inner()
            .find_remote(remote_name)
            .map_err(|e| GitError::remote_not_found(remote_name, e))?;

        let reference = branch.reference();
        let refspec = branch.deletion_refspec();
        let mut absent = false;
        let mut rejection: Option<String> = None;
        let pushed = {
            let mut callbacks = RemoteCallbacks::new();
            callbacks.push_negotiation(|updates| {
                // The only update is the deletion; a zero source oid means the
                // remote has nothing to delete.
                if updates.iter().any(|update| update.src().is_zero()) {
                    absent = true;
                    return Err(git2::Error::from_str("remote branch does not exist"));
                }
                Ok(())
            });
            callbacks.push_update_reference(|refname, status| {
                if let Some(message) = status {
                    rejection = Some(format!("{} rejected: {}", refname, message));
                }
                Ok(())
            });

            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);

            remote.push(&[refspec.as_str()], Some(&mut options))
        };

        if absent {
            return Err(GitError::remote_branch_delete(
                branch.as_str(),
                format!("{} does not exist on {}", reference, remote_name),
                None,
            ));
        }
        pushed.map_err(|e| {
            GitError::remote_branch_delete(
                branch.as_str(),
                format!("pushing {} to {}", refspec, remote_name),
                Some(e),
            )
        })?;

        if let Some(details) = rejection {
            return Err(GitError::remote_branch_delete(branch.as_str(), details, None));
        }

        info!("Deleted branch {} on remote {}", branch, remote_name);
        Ok(())
    }

    /// Short name of the branch HEAD points at, e.g. `main`
    ///
    /// Fails on a detached HEAD and on a repository without commits.
    pub fn current_branch_short_name(&self) -> GitResult<String> {
        let head = self.inner().head().map_err(|e| {
            let details = if e.code() == git2::ErrorCode::UnbornBranch {
                "repository has no commits".to_string()
            } else {
                "cannot resolve HEAD".to_string()
            };
            GitError::head(details, Some(e))
        })?;

        if !head.is_branch() {
            return Err(GitError::head("HEAD is detached".to_string(), None));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| GitError::head("branch name is not valid UTF-8".to_string(), None))
    }
}
