//! stackpr CLI.
//!
//! Commands:
//! - `stackpr git <ARGS>...`: run git without an interactive editor
//! - `stackpr branch`: print the current branch
//! - `stackpr delete-remote <BRANCH>`: delete a branch on the configured remote
//! - `stackpr root`: print the working tree root
//! - `stackpr config`: print the resolved configuration
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: Fatal error (no usable repository, bad configuration, `--strict` failure)

use std::io;

use clap::Parser;
use stackpr_cli::{exit_code, Cli, Session};
use stackpr_common::ErrorChain;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("stackpr=debug,stackpr_cli=debug,stackpr_git=debug,stackpr_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();

    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let result = Session::start().and_then(|mut session| {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        session.dispatch(cli.command, &mut out)
    });

    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!("exiting after error: {:#}", e);
            let code = exit_code(&e);
            eprint!("{}", ErrorChain::new(&*e));
            code
        }
    }
}
