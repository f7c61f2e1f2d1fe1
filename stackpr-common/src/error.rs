//! Error classification shared across the stackpr crates
//!
//! Each crate defines its own error enum with `thiserror`. This module gives
//! them a common vocabulary for how bad an error is, so the binary can decide
//! between reporting and terminating without knowing every variant.

use std::fmt;

/// Severity levels for error classification
///
/// - **Warning**: the operation can proceed, the user should know about it.
/// - **Error**: the operation failed, the process can keep going or exit cleanly.
/// - **Critical**: the tool cannot operate in the current environment at all.
///
/// # Examples
///
/// ```rust
/// use stackpr_common::ErrorSeverity;
///
/// // A rejected push of one branch is an ordinary failure
/// let rejected = ErrorSeverity::Error;
///
/// // Running outside any repository is fatal
/// let no_repo = ErrorSeverity::Critical;
/// assert_ne!(rejected, no_repo);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but the process can continue
    Error,

    /// The process cannot continue
    ///
    /// Reserved for startup and precondition failures: no repository, a bare
    /// repository, an untranslatable working tree path.
    Critical,
}

impl ErrorSeverity {
    /// Process exit code conventionally used for this severity
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Warning => 0,
            ErrorSeverity::Error => 1,
            ErrorSeverity::Critical => 2,
        }
    }

    /// Whether an error at this level must stop the process
    pub fn is_fatal(self) -> bool {
        matches!(self, ErrorSeverity::Critical)
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use stackpr_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     NotARepository,
///     PushRejected,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::NotARepository => ErrorSeverity::Critical,
///             MyError::PushRejected => ErrorSeverity::Error,
///         }
///     }
/// }
///
/// assert_eq!(MyError::NotARepository.severity(), ErrorSeverity::Critical);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

/// Error chain formatter for detailed error reporting
pub struct ErrorChain<'a>(&'a dyn std::error::Error);

impl<'a> ErrorChain<'a> {
    /// Chain formatter for a type-erased error
    pub fn new(error: &'a dyn std::error::Error) -> Self {
        Self(error)
    }
}

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}", self.0)?;

        let mut current = self.0.source();
        let mut level = 1;

        while let Some(err) = current {
            writeln!(f, "{:indent$}Caused by: {}", "", err, indent = level * 2)?;
            current = err.source();
            level += 1;
        }

        Ok(())
    }
}

/// Extension trait for error types to format the full error chain
pub trait ErrorChainExt {
    /// Format the full error chain
    fn error_chain(&self) -> ErrorChain<'_>;
}

impl<E: std::error::Error> ErrorChainExt for E {
    fn error_chain(&self) -> ErrorChain<'_> {
        ErrorChain(self)
    }
}
