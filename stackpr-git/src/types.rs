//! Core types for Git operations
//!
//! Branch names end up both inside single-space-delimited argument lines and
//! inside push refspecs, so they are validated once on the way in.

use crate::error::{GitError, GitResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Git branch names
///
/// This newtype prevents confusion between branch names and other strings,
/// and provides validation for branch name syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchName(String);

impl BranchName {
    /// Create a new branch name with validation
    ///
    /// # Arguments
    /// * `name` - The branch name string
    ///
    /// # Returns
    /// * `Ok(BranchName)` if the name is valid
    /// * `Err(GitError)` if the name is invalid
    ///
    /// # Examples
    /// ```
    /// use stackpr_git::BranchName;
    ///
    /// let branch = BranchName::new("feature/user-auth").unwrap();
    /// assert_eq!(branch.reference(), "refs/heads/feature/user-auth");
    /// assert!(BranchName::new("two words").is_err());
    /// ```
    pub fn new<S: Into<String>>(name: S) -> GitResult<Self> {
        let name = name.into();
        Self::validate_branch_name(&name)?;
        Ok(Self(name))
    }

    /// Get the branch name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully qualified reference name (`refs/heads/<name>`)
    pub fn reference(&self) -> String {
        format!("refs/heads/{}", self.0)
    }

    /// Push refspec that deletes this branch on a remote
    ///
    /// An empty source side pushes nothing onto the destination, which
    /// removes it.
    pub fn deletion_refspec(&self) -> String {
        format!(":{}", self.reference())
    }

    /// Validate a branch name according to Git rules
    fn validate_branch_name(name: &str) -> GitResult<()> {
        if name.is_empty() {
            return Err(GitError::invalid_branch_name(
                name.to_string(),
                "Branch name cannot be empty".to_string(),
            ));
        }

        if name.starts_with('-') {
            return Err(GitError::invalid_branch_name(
                name.to_string(),
                "Branch name cannot start with a dash".to_string(),
            ));
        }

        if name.contains("..") {
            return Err(GitError::invalid_branch_name(
                name.to_string(),
                "Branch name cannot contain double dots (..)".to_string(),
            ));
        }

        if name.contains(' ') {
            return Err(GitError::invalid_branch_name(
                name.to_string(),
                "Branch name cannot contain spaces".to_string(),
            ));
        }

        if name.contains('\t') || name.contains('\n') {
            return Err(GitError::invalid_branch_name(
                name.to_string(),
                "Branch name cannot contain whitespace characters".to_string(),
            ));
        }

        // Check for invalid characters
        let invalid_chars = ['~', '^', ':', '?', '*', '[', '\\'];
        for &ch in &invalid_chars {
            if name.contains(ch) {
                return Err(GitError::invalid_branch_name(
                    name.to_string(),
                    format!("Branch name cannot contain '{}'", ch),
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BranchName {
    type Err = GitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
