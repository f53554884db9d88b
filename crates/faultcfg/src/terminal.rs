//! Styled output helpers for the `check` summary.

use std::path::Path;

use console::style;
use faultcfg::{Analysis, Toolchain};
use faultcfg_elf::MemoryRegion;
use faultcfg_elf::hex::Hex;

/// Print a success line.
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print a failure line.
pub fn failure(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a bold section header.
fn header(message: &str) {
    eprintln!("\n{}", style(message).bold());
}

/// Print an aligned `label value` row.
fn row(label: &str, value: impl std::fmt::Display) {
    eprintln!("  {:<10} {}", style(label).dim(), value);
}

fn region(region: MemoryRegion) -> String {
    format!(
        "{}..{} ({} bytes)",
        Hex(region.origin),
        Hex(region.end()),
        region.length
    )
}

/// Summary of everything derived before extraction.
pub fn print_analysis(elf: &Path, toolchain: &Toolchain, analysis: &Analysis) {
    success(&format!("{} is ready for fault simulation", elf.display()));

    header("Target");
    row("toolchain", toolchain.prefix());
    row("isa", analysis.isa);
    row("flash", region(analysis.layout.flash));
    row("ram", region(analysis.layout.ram));

    header("Symbols");
    row("start", Hex(analysis.symbols.start));
    for halt in &analysis.symbols.halts {
        row("halt", format!("{} {}", Hex(halt.address), style(&halt.label).cyan()));
    }
    for range in &analysis.symbols.ignores {
        row("ignore", format!("{}..{}", Hex(range.start), Hex(range.end)));
    }

    header("Sections");
    for section in &analysis.sections {
        row(&section.name, Hex(section.load_address));
    }
}
