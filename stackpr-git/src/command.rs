//! Argument vectors for non-interactive git invocations
//!
//! Every invocation starts with the same four `-c` overrides so that amend
//! and interactive rebase never wait on a human. Caller arguments follow,
//! split on single spaces. Nothing goes through a shell, so metacharacters
//! are inert, but an argument containing a space would be split in two.

/// Program spawned for every invocation
pub const GIT_PROGRAM: &str = "git";

/// Editor substitute used when the caller does not supply one
pub const DEFAULT_EDITOR: &str = "/usr/bin/true";

/// A single git invocation, built, executed once and dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    argument_line: String,
    editor_override: String,
    capture_output: bool,
}

impl CommandInvocation {
    /// Invocation with the default editor and no output capture
    pub fn new<S: Into<String>>(argument_line: S) -> Self {
        Self {
            argument_line: argument_line.into(),
            editor_override: DEFAULT_EDITOR.to_string(),
            capture_output: false,
        }
    }

    /// Replace the editor substitute
    pub fn with_editor<S: Into<String>>(mut self, editor: S) -> Self {
        self.editor_override = editor.into();
        self
    }

    /// Choose whether combined output is handed back to the caller
    pub fn capture(mut self, capture_output: bool) -> Self {
        self.capture_output = capture_output;
        self
    }

    pub fn argument_line(&self) -> &str {
        &self.argument_line
    }

    pub fn editor_override(&self) -> &str {
        &self.editor_override
    }

    pub fn captures_output(&self) -> bool {
        self.capture_output
    }

    /// First space-delimited token, the git subcommand
    pub fn subcommand(&self) -> &str {
        self.argument_line.split(' ').next().unwrap_or_default()
    }

    /// Full argument vector passed to [`GIT_PROGRAM`]
    pub fn arguments(&self) -> Vec<String> {
        build_arguments(&self.argument_line, &self.editor_override)
    }
}

/// Build the argument vector for `git`
///
/// ```
/// use stackpr_git::command::build_arguments;
///
/// let args = build_arguments("commit --amend", "/usr/bin/true");
/// assert_eq!(args[..8], [
///     "-c", "core.editor=/usr/bin/true",
///     "-c", "commit.verbose=false",
///     "-c", "rebase.abbreviateCommands=false",
///     "-c", "sequence.editor=/usr/bin/true",
/// ]);
/// assert_eq!(args[8..], ["commit", "--amend"]);
/// ```
pub fn build_arguments(argument_line: &str, editor: &str) -> Vec<String> {
    let mut args = vec![
        "-c".to_string(),
        format!("core.editor={}", editor),
        "-c".to_string(),
        "commit.verbose=false".to_string(),
        "-c".to_string(),
        "rebase.abbreviateCommands=false".to_string(),
        "-c".to_string(),
        format!("sequence.editor={}", editor),
    ];
    args.extend(argument_line.split(' ').map(str::to_string));
    args
}

/// Number of leading arguments [`build_arguments`] always emits
pub const OVERRIDE_ARG_COUNT: usize = 8;
