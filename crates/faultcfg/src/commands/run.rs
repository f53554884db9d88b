//! Run command.

use std::path::Path;

use faultcfg::{Binutils, Deriver, Objcopy};
use tracing::{info, warn};

use crate::cli::{EXIT_FAILURE, TargetArgs};
use crate::commands::report;

/// Handle the `run` command. Returns the engine's own exit code.
pub fn cmd_run(target: &TargetArgs, engine: &Path) -> i32 {
    let toolchain = target.toolchain();
    let source = Binutils::new(toolchain.clone(), &target.elf, &target.map);
    let extractor = Objcopy::new(toolchain, &target.elf);

    let status = match Deriver::new(target.options()).run(&source, &extractor, engine) {
        Ok(status) => status,
        Err(e) => {
            report(&e, "run failed");
            return EXIT_FAILURE;
        }
    };

    if let Some(code) = status.code() {
        info!(code, "engine exited");
        code
    } else {
        warn!("engine terminated by a signal");
        EXIT_FAILURE
    }
}
