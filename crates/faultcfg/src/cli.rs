//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use faultcfg::{DEFAULT_TOOLCHAIN_PREFIX, DeriveOptions, Toolchain};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "faultcfg")]
#[command(about = "Derive fault-simulation engine arguments from an ARM Cortex-M build")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract sections and print the engine argument list
    Derive {
        #[command(flatten)]
        target: TargetArgs,

        /// Directory receiving the extracted section files
        #[arg(short, long, default_value = "tmp_data")]
        out_dir: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "line")]
        format: OutputFormat,
    },
    /// Derive into a temporary directory and run the engine
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Path to the fault simulation engine
        #[arg(long, value_name = "PATH")]
        engine: PathBuf,
    },
    /// Analyze the binary without extracting anything
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Binary under test and the symbols that steer the derivation.
#[derive(Args, Clone, Debug)]
pub struct TargetArgs {
    /// Compiled ELF file
    #[arg(long, value_name = "ELF")]
    pub elf: PathBuf,

    /// Linker map file of the same build
    #[arg(long, value_name = "MAP")]
    pub map: PathBuf,

    /// Symbol where emulation starts
    #[arg(long, value_name = "SYMBOL", default_value = "main")]
    pub start: String,

    /// Symbol marking successful termination (repeatable)
    #[arg(long, value_name = "SYMBOL", required = true)]
    pub halt: Vec<String>,

    /// Symbol whose code must not be faulted (repeatable)
    #[arg(long, value_name = "SYMBOL")]
    pub ignore: Vec<String>,

    /// Cross binutils prefix
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_TOOLCHAIN_PREFIX)]
    pub toolchain: String,

    /// Engine emulation timeout in clock cycles
    #[arg(long, value_name = "CYCLES")]
    pub timeout: Option<u64>,
}

impl TargetArgs {
    #[must_use]
    pub fn options(&self) -> DeriveOptions {
        DeriveOptions::new(&self.start)
            .with_halt_symbols(&self.halt)
            .with_ignore_symbols(&self.ignore)
            .with_timeout(self.timeout)
    }

    #[must_use]
    pub fn toolchain(&self) -> Toolchain {
        Toolchain::new(&self.toolchain)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single space-separated line
    #[default]
    Line,
    /// One option and its operands per line
    Lines,
}
