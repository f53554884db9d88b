//! The derived configuration and its argument-list form.

use std::fmt;

use faultcfg_elf::hex::Hex;

use crate::isa::IsaVariant;
use crate::layout::MemoryLayout;
use crate::sections::SectionBlob;
use crate::symbols::{HaltAddress, IgnoreRange};

/// Complete input for the fault-simulation engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultConfig {
    pub isa: IsaVariant,
    pub layout: MemoryLayout,
    pub start: u64,
    pub halts: Vec<HaltAddress>,
    pub ignores: Vec<IgnoreRange>,
    pub sections: Vec<SectionBlob>,
    /// Emulation timeout in clock cycles.
    pub timeout: Option<u64>,
}

impl FaultConfig {
    /// Flatten into engine arguments.
    ///
    /// The order is fixed: start, halts, ignores, flash, ram, ISA flag,
    /// sections, then the optional timeout.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["--start".to_string(), Hex(self.start).to_string()];

        for halt in &self.halts {
            args.extend([
                "--halt".to_string(),
                halt.label.clone(),
                Hex(halt.address).to_string(),
            ]);
        }
        for range in &self.ignores {
            args.extend([
                "--ignore".to_string(),
                Hex(range.start).to_string(),
                Hex(range.end).to_string(),
            ]);
        }

        let MemoryLayout { flash, ram } = self.layout;
        args.extend([
            "--flash".to_string(),
            Hex(flash.origin).to_string(),
            Hex(flash.length).to_string(),
            "--ram".to_string(),
            Hex(ram.origin).to_string(),
            Hex(ram.length).to_string(),
            self.isa.flag().to_string(),
        ]);

        for section in &self.sections {
            args.extend([
                "--section".to_string(),
                section.path.display().to_string(),
                Hex(section.load_address).to_string(),
            ]);
        }

        if let Some(timeout) = self.timeout {
            args.extend(["--timeout".to_string(), timeout.to_string()]);
        }

        args
    }
}

/// Single space-separated line, as handed to the engine on a command line.
impl fmt::Display for FaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_args().join(" "))
    }
}
