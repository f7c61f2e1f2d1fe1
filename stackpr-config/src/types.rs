//! Configuration types
//!
//! Repository settings describe where stacked branches live; user settings
//! describe how this particular person wants the tool to behave.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use stackpr_git::{GitSettings, DEFAULT_REMOTE};

/// Branch that stacks are based on when none is configured
pub const DEFAULT_BRANCH: &str = "main";

/// Fully resolved configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repo: RepoConfig,
    pub user: UserConfig,
}

/// Per-repository settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Remote that stack branches are pushed to and deleted from
    pub github_remote: String,
    /// Branch the stack is rebased onto
    pub github_branch: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            github_remote: DEFAULT_REMOTE.to_string(),
            github_branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

/// Per-user settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Never run `git rebase`
    pub no_rebase: bool,
    /// Print every git command before running it
    pub log_git_commands: bool,
}

impl Config {
    /// Reject values the execution layer cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.repo.github_remote.trim().is_empty() {
            return Err(ConfigError::validation("repo.github_remote must not be empty"));
        }
        if self.repo.github_remote.contains(' ') {
            return Err(ConfigError::validation(format!(
                "repo.github_remote '{}' must not contain spaces",
                self.repo.github_remote
            )));
        }
        if self.repo.github_branch.trim().is_empty() {
            return Err(ConfigError::validation("repo.github_branch must not be empty"));
        }
        Ok(())
    }

    /// Settings consumed by the git execution layer
    pub fn git_settings(&self) -> GitSettings {
        GitSettings {
            no_rebase: self.user.no_rebase,
            log_git_commands: self.user.log_git_commands,
            remote_name: self.repo.github_remote.clone(),
        }
    }
}
