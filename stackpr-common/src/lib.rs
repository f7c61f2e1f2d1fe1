//! # stackpr Common
//!
//! Foundational pieces shared by the stackpr crates:
//!
//! - [`error`] - severity classification and error-chain formatting
//! - [`logging`] - helpers for rendering values inside `tracing` events

pub mod error;
pub mod logging;

pub use error::{ErrorChain, ErrorChainExt, ErrorSeverity, Severity};
pub use logging::Pretty;
