//! Check command.

use faultcfg::{Binutils, Deriver};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, TargetArgs};
use crate::commands::report;
use crate::terminal;

/// Handle the `check` command.
pub fn cmd_check(target: &TargetArgs) -> i32 {
    let toolchain = target.toolchain();
    let source = Binutils::new(toolchain.clone(), &target.elf, &target.map);

    match Deriver::new(target.options()).analyze(&source) {
        Ok(analysis) => {
            terminal::print_analysis(&target.elf, &toolchain, &analysis);
            EXIT_SUCCESS
        }
        Err(e) => {
            report(&e, "check failed");
            terminal::failure(&e.to_string());
            EXIT_FAILURE
        }
    }
}
