//! Derive command.

use std::io::{self, Write};
use std::path::Path;

use faultcfg::{Binutils, Deriver, FaultConfig, Objcopy, SectionDir};
use tracing::{error, info};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, OutputFormat, TargetArgs};
use crate::commands::report;

/// Handle the `derive` command.
pub fn cmd_derive(target: &TargetArgs, out_dir: &Path, format: OutputFormat) -> i32 {
    let dir = match SectionDir::persistent(out_dir) {
        Ok(dir) => dir,
        Err(e) => {
            error!(error = %e, path = %out_dir.display(), "failed to create output directory");
            return EXIT_FAILURE;
        }
    };

    let toolchain = target.toolchain();
    let source = Binutils::new(toolchain.clone(), &target.elf, &target.map);
    let extractor = Objcopy::new(toolchain, &target.elf);

    let config = match Deriver::new(target.options()).derive(&source, &extractor, dir.path()) {
        Ok(config) => config,
        Err(e) => {
            report(&e, "derivation failed");
            return EXIT_FAILURE;
        }
    };
    info!(
        sections = config.sections.len(),
        dir = %dir.path().display(),
        "derived configuration"
    );

    let mut stdout = io::stdout().lock();
    if let Err(e) = write_config(&mut stdout, &config, format) {
        error!(error = %e, "failed to write configuration");
        return EXIT_FAILURE;
    }
    EXIT_SUCCESS
}

fn write_config(out: &mut impl Write, config: &FaultConfig, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Line => writeln!(out, "{config}"),
        OutputFormat::Lines => {
            for line in option_lines(&config.to_args()) {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
    }
}

/// Group an argument list into one line per option with its operands.
fn option_lines(args: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for arg in args {
        match lines.last_mut() {
            Some(line) if !arg.starts_with("--") => {
                line.push(' ');
                line.push_str(arg);
            }
            _ => lines.push(arg.clone()),
        }
    }
    lines
}
