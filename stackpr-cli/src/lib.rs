//! stackpr command-line interface.
//!
//! The binary is a thin shell around [`Session`]: parse [`Cli`], start a
//! session for the enclosing repository, dispatch the subcommand and turn
//! the outcome into an exit code with [`exit_code`].

pub mod cli;
pub mod session;

pub use cli::{Cli, Commands};
pub use session::{exit_code, Session};
