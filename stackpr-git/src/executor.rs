//! Process spawning capability
//!
//! [`CommandRunner`] is the seam between the execution layer and the
//! operating system. [`ProcessRunner`] spawns real processes; tests swap in a
//! recorder that never leaves the process.

use crate::environment::Environment;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::trace;

/// Result of running one process to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    /// Whether the process exited successfully
    pub success: bool,
    /// Standard output followed by standard error
    pub combined: Vec<u8>,
}

impl CommandOutput {
    /// Successful output carrying `text`
    pub fn success<S: Into<Vec<u8>>>(text: S) -> Self {
        Self {
            code: Some(0),
            success: true,
            combined: text.into(),
        }
    }

    /// Failed output with exit `code` carrying `text`
    pub fn failure<S: Into<Vec<u8>>>(code: i32, text: S) -> Self {
        Self {
            code: Some(code),
            success: false,
            combined: text.into(),
        }
    }

    /// Combined output decoded lossily as UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.combined).into_owned()
    }
}

/// Runs a program to completion
///
/// Implementations must give the child exactly `env` (nothing inherited) and
/// start it in `dir`. Calls block until the child exits.
pub trait CommandRunner: Send {
    fn run(
        &self,
        program: &str,
        args: &[String],
        env: &Environment,
        dir: &Path,
    ) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        env: &Environment,
        dir: &Path,
    ) -> io::Result<CommandOutput> {
        trace!(
            "Spawning {} with {} args in {}",
            program,
            args.len(),
            dir.display()
        );

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::null())
            .output()?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            combined,
        })
    }
}
