//! Rebase suppression
//!
//! Some environments must never rewrite history (protected shared branches,
//! CI mirrors). Rather than teaching every call site about that, any
//! invocation whose subcommand is `rebase` is skipped as a successful no-op
//! when the policy is active.

use crate::environment::Environment;

/// Environment variable that forces rebase suppression when present
pub const NO_REBASE_ENV: &str = "STACKPR_NOREBASE";

/// Gate evaluated before every invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebasePolicy {
    no_rebase: bool,
}

impl RebasePolicy {
    /// Policy driven by the configured no-rebase flag
    pub fn new(no_rebase: bool) -> Self {
        Self { no_rebase }
    }

    /// Whether the invocation must be skipped
    ///
    /// The environment override counts when set to anything, including the
    /// empty string.
    pub fn suppresses(&self, argument_line: &str, env: &Environment) -> bool {
        is_rebase(argument_line) && (self.no_rebase || env.contains(NO_REBASE_ENV))
    }
}

/// Whether the first token of the argument line is `rebase`
pub fn is_rebase(argument_line: &str) -> bool {
    argument_line.split(' ').next() == Some("rebase")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_override() -> Environment {
        Environment::from_pairs([("HOME", "/home/dev")])
    }

    fn with_override(value: &str) -> Environment {
        Environment::from_pairs([("HOME", "/home/dev"), (NO_REBASE_ENV, value)])
    }

    #[test]
    fn test_is_rebase() {
        assert!(is_rebase("rebase"));
        assert!(is_rebase("rebase -i origin/main"));
        assert!(!is_rebase("rebased"));
        assert!(!is_rebase("commit --amend"));
        assert!(!is_rebase("log rebase"));
        assert!(!is_rebase(""));
    }

    #[test]
    fn test_config_flag_suppresses_rebase() {
        let policy = RebasePolicy::new(true);
        assert!(policy.suppresses("rebase origin/main", &no_override()));
        assert!(!policy.suppresses("push origin main", &no_override()));
    }

    #[test]
    fn test_env_override_suppresses_rebase() {
        let policy = RebasePolicy::new(false);
        assert!(policy.suppresses("rebase -i HEAD~3", &with_override("1")));
        assert!(policy.suppresses("rebase -i HEAD~3", &with_override("")));
    }

    #[test]
    fn test_inactive_policy_passes_rebase_through() {
        let policy = RebasePolicy::default();
        assert!(!policy.suppresses("rebase origin/main", &no_override()));
    }
}
