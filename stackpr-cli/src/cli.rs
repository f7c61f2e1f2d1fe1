//! CLI definition for the stackpr command-line interface.

use clap::{Parser, Subcommand};

/// stackpr - stacked pull requests on top of plain git
#[derive(Parser, Debug)]
#[command(name = "stackpr")]
#[command(version)]
#[command(about = "Run git non-interactively for stacked pull request workflows")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run a git command without ever opening an editor
    Git {
        /// Print the command's combined output
        #[arg(long)]
        capture: bool,
        /// Command git runs in place of the interactive editor
        #[arg(long, value_name = "CMD")]
        editor: Option<String>,
        /// Treat a failing command as fatal
        #[arg(long)]
        strict: bool,
        /// Arguments passed to git, e.g. `commit --amend`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the short name of the checked out branch
    Branch,
    /// Delete a branch on the configured remote
    DeleteRemote {
        /// Branch name without the refs/heads/ prefix
        branch: String,
    },
    /// Print the working tree root git commands run in
    Root,
    /// Print the resolved configuration as YAML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_debug_is_global() {
        let cli = Cli::parse_from(["stackpr", "branch", "--debug"]);
        assert!(cli.debug);
        assert_eq!(cli.command, Commands::Branch);

        let cli = Cli::parse_from(["stackpr", "-d", "root"]);
        assert!(cli.debug);
        assert_eq!(cli.command, Commands::Root);
    }

    #[test]
    fn test_cli_parsing_git_passes_hyphenated_args_through() {
        let cli = Cli::parse_from(["stackpr", "git", "commit", "--amend", "--no-edit"]);
        match cli.command {
            Commands::Git {
                args,
                capture,
                strict,
                editor,
            } => {
                assert_eq!(args, vec!["commit", "--amend", "--no-edit"]);
                assert!(!capture);
                assert!(!strict);
                assert!(editor.is_none());
            }
            _ => panic!("Expected Git command"),
        }
    }

    #[test]
    fn test_cli_parsing_git_flags() {
        let cli = Cli::parse_from([
            "stackpr", "git", "--capture", "--strict", "--editor", "cp msg", "log", "-n", "1",
        ]);
        match cli.command {
            Commands::Git {
                args,
                capture,
                strict,
                editor,
            } => {
                assert_eq!(args, vec!["log", "-n", "1"]);
                assert!(capture);
                assert!(strict);
                assert_eq!(editor.as_deref(), Some("cp msg"));
            }
            _ => panic!("Expected Git command"),
        }
    }

    #[test]
    fn test_cli_parsing_git_requires_args() {
        assert!(Cli::try_parse_from(["stackpr", "git"]).is_err());
    }

    #[test]
    fn test_cli_parsing_delete_remote() {
        let cli = Cli::parse_from(["stackpr", "delete-remote", "pr/feature-1"]);
        assert_eq!(
            cli.command,
            Commands::DeleteRemote {
                branch: "pr/feature-1".to_string()
            }
        );
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["stackpr"]).is_err());
    }
}
