//! faultcfg CLI - fault-simulation arguments for ARM Cortex-M builds

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "faultcfg=debug"
    } else if cli.silent {
        "faultcfg=error"
    } else {
        "faultcfg=info"
    };
    // stdout is reserved for the argument list
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(default_level.parse().expect("static log directive")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(commands::run_command(&cli));
}
