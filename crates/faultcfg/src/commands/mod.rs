//! Command implementations.
//!
//! Each submodule handles one subcommand.

mod check;
mod derive;
mod run;

use std::io::{self, Write};

use faultcfg::{Error, ToolFailure};
use tracing::{error, warn};

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Derive { .. } => handle_derive(cli),
        Commands::Run { .. } => handle_run(cli),
        Commands::Check { .. } => handle_check(cli),
    }
}

fn handle_derive(cli: &Cli) -> i32 {
    let Commands::Derive {
        target,
        out_dir,
        format,
    } = &cli.command
    else {
        unreachable!("derive command variant mismatch");
    };

    derive::cmd_derive(target, out_dir, *format)
}

fn handle_run(cli: &Cli) -> i32 {
    let Commands::Run { target, engine } = &cli.command else {
        unreachable!("run command variant mismatch");
    };

    run::cmd_run(target, engine)
}

fn handle_check(cli: &Cli) -> i32 {
    let Commands::Check { target } = &cli.command else {
        unreachable!("check command variant mismatch");
    };

    check::cmd_check(target)
}

/// Log a derivation failure. A failing tool's output is passed through
/// unmodified.
fn report(err: &Error, what: &str) {
    if let Error::ExternalToolFailure(failure) = err {
        let result = passthrough(failure, &mut io::stdout().lock(), &mut io::stderr().lock());
        if let Err(e) = result {
            warn!(error = %e, "failed to print tool output");
        }
    }
    error!(error = %err, "{what}");
}

/// Replay a tool's captured output byte for byte.
fn passthrough(
    failure: &ToolFailure,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> io::Result<()> {
    stdout.write_all(failure.stdout.as_bytes())?;
    stdout.flush()?;
    stderr.write_all(failure.stderr.as_bytes())?;
    stderr.flush()
}
