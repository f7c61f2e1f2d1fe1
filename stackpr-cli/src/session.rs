//! One run of the binary: resolved configuration plus a git context.

use std::io::Write;

use anyhow::{Context, Result};
use stackpr_common::{Pretty, Severity};
use stackpr_config::{load_configuration, Config, ConfigError};
use stackpr_git::{GitCmd, GitError, GitRepository};
use tracing::debug;

use crate::cli::Commands;

/// Everything a subcommand needs
pub struct Session {
    config: Config,
    git: GitCmd,
}

impl Session {
    /// Session for the repository enclosing the current directory
    pub fn start() -> Result<Self> {
        let repository = GitRepository::locate()?;
        let config = load_configuration(Some(repository.root()))?;
        Ok(Self::with_config(config, repository))
    }

    /// Session over an already resolved configuration
    pub fn with_config(config: Config, repository: GitRepository) -> Self {
        debug!("Starting session in {}", repository.root().display());
        let git = GitCmd::from_repository(config.git_settings(), repository);
        Self { config, git }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn git(&mut self) -> &mut GitCmd {
        &mut self.git
    }

    /// Run one subcommand, writing its result to `out`
    pub fn dispatch(&mut self, command: Commands, out: &mut dyn Write) -> Result<()> {
        match command {
            Commands::Git {
                capture,
                editor,
                strict,
                args,
            } => self.run_git(&args.join(" "), capture, editor.as_deref(), strict, out),
            Commands::Branch => {
                let branch = self.git.current_branch_short_name()?;
                writeln!(out, "{}", branch)?;
                Ok(())
            }
            Commands::DeleteRemote { branch } => {
                self.git.delete_remote_branch(&branch)?;
                writeln!(
                    out,
                    "Deleted {} on {}",
                    branch, self.config.repo.github_remote
                )?;
                Ok(())
            }
            Commands::Root => {
                writeln!(out, "{}", self.git.root_dir().display())?;
                Ok(())
            }
            Commands::Config => {
                debug!("Printing configuration:{}", Pretty(&self.config));
                let yaml = serde_yaml_ng::to_string(&self.config)
                    .context("serializing configuration")?;
                write!(out, "{}", yaml)?;
                Ok(())
            }
        }
    }

    fn run_git(
        &mut self,
        argument_line: &str,
        capture: bool,
        editor: Option<&str>,
        strict: bool,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut output = String::new();
        let sink = capture.then_some(&mut output);

        let result = match editor {
            Some(editor) => self.git.execute_with_editor(argument_line, sink, editor),
            None => self.git.execute(argument_line, sink),
        };
        let result = if strict {
            result.map_err(GitError::into_fatal)
        } else {
            result
        };

        if capture && !output.is_empty() {
            writeln!(out, "{}", output)?;
        }
        result?;
        Ok(())
    }
}

/// Process exit code for an error surfaced by a subcommand
///
/// The most severe classified error in the chain wins; anything
/// unclassified counts as an ordinary failure.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .filter_map(|cause| {
            if let Some(git) = cause.downcast_ref::<GitError>() {
                Some(git.severity())
            } else {
                cause.downcast_ref::<ConfigError>().map(Severity::severity)
            }
        })
        .max()
        .map(|severity| severity.exit_code())
        .unwrap_or(1)
}
