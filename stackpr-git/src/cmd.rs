//! Execution context for git invocations
//!
//! [`GitCmd`] is created once per run. It owns the resolved settings, the
//! opened repository, the working tree root every process is started in, and
//! the sinks for diagnostics and command echo. Invocations are strictly
//! sequential: each one borrows the context mutably.

use crate::command::{CommandInvocation, DEFAULT_EDITOR, GIT_PROGRAM};
use crate::environment::Environment;
use crate::error::{convert_io_error, GitError, GitResult};
use crate::executor::{CommandRunner, ProcessRunner};
use crate::policy::RebasePolicy;
use crate::repository::GitRepository;
use crate::types::BranchName;
use serde::{Deserialize, Serialize};
use stackpr_common::Severity;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Remote used when none is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// Settings the execution layer reads, resolved by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSettings {
    /// Skip every `rebase` invocation
    pub no_rebase: bool,
    /// Echo each command as `> git ...` before running it
    pub log_git_commands: bool,
    /// Remote that branch deletions are pushed to
    pub remote_name: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            no_rebase: false,
            log_git_commands: false,
            remote_name: DEFAULT_REMOTE.to_string(),
        }
    }
}

/// Non-interactive git execution bound to one working tree
pub struct GitCmd {
    settings: GitSettings,
    repository: GitRepository,
    root_dir: PathBuf,
    diagnostics: Box<dyn Write + Send>,
    echo: Box<dyn Write + Send>,
    runner: Box<dyn CommandRunner>,
    environment: Option<Environment>,
}

impl std::fmt::Debug for GitCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitCmd")
            .field("settings", &self.settings)
            .field("repository", &self.repository)
            .field("root_dir", &self.root_dir)
            .finish_non_exhaustive()
    }
}

impl GitCmd {
    /// Context for the repository enclosing the current directory
    pub fn locate(settings: GitSettings) -> GitResult<Self> {
        Ok(Self::from_repository(settings, GitRepository::locate()?))
    }

    /// Context for the repository enclosing `path`
    pub fn open<P: AsRef<Path>>(settings: GitSettings, path: P) -> GitResult<Self> {
        Ok(Self::from_repository(settings, GitRepository::open(path)?))
    }

    /// Context for an already opened repository
    ///
    /// Diagnostics go to stderr, the command echo to stdout, and processes
    /// are spawned for real.
    pub fn from_repository(settings: GitSettings, repository: GitRepository) -> Self {
        let root_dir = repository.root().to_path_buf();
        Self {
            settings,
            repository,
            root_dir,
            diagnostics: Box::new(std::io::stderr()),
            echo: Box::new(std::io::stdout()),
            runner: Box::new(ProcessRunner),
            environment: None,
        }
    }

    /// Replace the process runner
    pub fn with_runner<R: CommandRunner + 'static>(mut self, runner: R) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Use a fixed environment instead of reading the process environment
    /// at each invocation
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn settings(&self) -> &GitSettings {
        &self.settings
    }

    pub fn repository(&self) -> &GitRepository {
        &self.repository
    }

    /// Directory every git process is started in
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn set_root_dir<P: Into<PathBuf>>(&mut self, root_dir: P) {
        self.root_dir = root_dir.into();
        debug!("Root directory set to {}", self.root_dir.display());
    }

    /// Where raw output of failed commands is written
    pub fn set_diagnostics_sink<W: Write + Send + 'static>(&mut self, sink: W) {
        self.diagnostics = Box::new(sink);
    }

    /// Where `> git ...` lines go when command logging is enabled
    pub fn set_echo_sink<W: Write + Send + 'static>(&mut self, sink: W) {
        self.echo = Box::new(sink);
    }

    /// Run `git <argument_line>` with the no-op editor
    ///
    /// When `output` is given it receives the trimmed combined output, also
    /// on failure.
    pub fn execute(&mut self, argument_line: &str, output: Option<&mut String>) -> GitResult<()> {
        self.execute_with_editor(argument_line, output, DEFAULT_EDITOR)
    }

    /// Run `git <argument_line>` with `editor` standing in for the
    /// interactive editor
    pub fn execute_with_editor(
        &mut self,
        argument_line: &str,
        output: Option<&mut String>,
        editor: &str,
    ) -> GitResult<()> {
        let invocation = CommandInvocation::new(argument_line)
            .with_editor(editor)
            .capture(output.is_some());
        self.run(&invocation, output)
    }

    /// Like [`execute`](Self::execute), but every failure is fatal
    pub fn execute_strict(
        &mut self,
        argument_line: &str,
        output: Option<&mut String>,
    ) -> GitResult<()> {
        self.execute(argument_line, output)
            .map_err(GitError::into_fatal)
    }

    /// Like [`execute_strict`](Self::execute_strict), but terminates the
    /// process on failure
    ///
    /// Only for call sites with no recovery strategy at all.
    pub fn execute_or_abort(&mut self, argument_line: &str, output: Option<&mut String>) {
        if let Err(err) = self.execute_strict(argument_line, output) {
            error!("{}", err);
            if let Err(write_err) = writeln!(self.diagnostics, "{}", err) {
                warn!("Failed to write diagnostics: {}", write_err);
            }
            std::process::exit(err.severity().exit_code());
        }
    }

    /// Execute one invocation
    pub fn run(
        &mut self,
        invocation: &CommandInvocation,
        output: Option<&mut String>,
    ) -> GitResult<()> {
        let argument_line = invocation.argument_line();
        let environment = match &self.environment {
            Some(environment) => environment.clone(),
            None => Environment::capture(),
        };

        if RebasePolicy::new(self.settings.no_rebase).suppresses(argument_line, &environment) {
            debug!("Rebase disabled, skipping: git {}", argument_line);
            return Ok(());
        }

        debug!("git {}", argument_line);
        if self.settings.log_git_commands {
            writeln!(self.echo, "> git {}", argument_line)
                .and_then(|_| self.echo.flush())
                .map_err(|e| convert_io_error("echo_command", e))?;
        }

        let result = self
            .runner
            .run(
                GIT_PROGRAM,
                &invocation.arguments(),
                &environment.sanitized(),
                &self.root_dir,
            )
            .map_err(|e| GitError::spawn(argument_line, e))?;

        let raw = result.text();
        if invocation.captures_output() {
            if let Some(output) = output {
                *output = raw.trim().to_string();
            }
        }

        if !result.success {
            self.report_failure(&raw);
            return Err(GitError::command_failed(argument_line, result.code));
        }

        Ok(())
    }

    fn report_failure(&mut self, raw: &str) {
        let written = write!(self.diagnostics, "git error: {}", raw)
            .and_then(|_| self.diagnostics.flush());
        if let Err(e) = written {
            warn!("Failed to write git diagnostics: {}", e);
        }
    }

    /// Delete `branch` on the configured remote
    pub fn delete_remote_branch(&self, branch: &str) -> GitResult<()> {
        let branch = BranchName::new(branch)?;
        self.repository
            .delete_remote_branch(&self.settings.remote_name, &branch)
    }

    /// Short name of the checked out branch
    pub fn current_branch_short_name(&self) -> GitResult<String> {
        self.repository.current_branch_short_name()
    }
}
