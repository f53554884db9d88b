//! Sources of the textual build metadata.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::constants::{OBJDUMP, READELF};
use crate::tool::{Toolchain, run_tool};
use crate::{MetadataError, Result};

/// Provider of the four metadata listings the derivation reads.
///
/// Each method returns the text exactly as the corresponding tool prints it.
pub trait MetadataSource {
    /// ELF attribute section (`readelf -A`).
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be produced.
    fn attributes(&self) -> Result<String>;

    /// Symbol table (`objdump -t`).
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be produced.
    fn symbol_table(&self) -> Result<String>;

    /// Section headers (`objdump -h`).
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be produced.
    fn section_headers(&self) -> Result<String>;

    /// Linker map file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be read.
    fn linker_map(&self) -> Result<String>;
}

/// Metadata read from an ELF file and its map through cross binutils.
#[derive(Clone, Debug)]
pub struct Binutils {
    toolchain: Toolchain,
    elf: PathBuf,
    map: PathBuf,
}

impl Binutils {
    #[must_use]
    pub fn new(toolchain: Toolchain, elf: &Path, map: &Path) -> Self {
        Self {
            toolchain,
            elf: elf.to_path_buf(),
            map: map.to_path_buf(),
        }
    }

    fn run(&self, tool: &str, flag: &str) -> Result<String> {
        let mut cmd = Command::new(self.toolchain.tool(tool));
        if tool == OBJDUMP {
            cmd.arg(&self.elf).arg(flag);
        } else {
            cmd.arg(flag).arg(&self.elf);
        }
        run_tool(&mut cmd)
    }
}

impl MetadataSource for Binutils {
    fn attributes(&self) -> Result<String> {
        self.run(READELF, "-A")
    }

    fn symbol_table(&self) -> Result<String> {
        self.run(OBJDUMP, "-t")
    }

    fn section_headers(&self) -> Result<String> {
        self.run(OBJDUMP, "-h")
    }

    fn linker_map(&self) -> Result<String> {
        std::fs::read_to_string(&self.map).map_err(|source| MetadataError::Read {
            path: self.map.display().to_string(),
            source,
        })
    }
}

/// Metadata held in memory, for synthetic inputs and replaying captured
/// tool output.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    pub attributes: String,
    pub symbol_table: String,
    pub section_headers: String,
    pub linker_map: String,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attributes(mut self, text: &str) -> Self {
        self.attributes = text.to_string();
        self
    }

    #[must_use]
    pub fn with_symbol_table(mut self, text: &str) -> Self {
        self.symbol_table = text.to_string();
        self
    }

    #[must_use]
    pub fn with_section_headers(mut self, text: &str) -> Self {
        self.section_headers = text.to_string();
        self
    }

    #[must_use]
    pub fn with_linker_map(mut self, text: &str) -> Self {
        self.linker_map = text.to_string();
        self
    }
}

impl MetadataSource for InMemorySource {
    fn attributes(&self) -> Result<String> {
        Ok(self.attributes.clone())
    }

    fn symbol_table(&self) -> Result<String> {
        Ok(self.symbol_table.clone())
    }

    fn section_headers(&self) -> Result<String> {
        Ok(self.section_headers.clone())
    }

    fn linker_map(&self) -> Result<String> {
        Ok(self.linker_map.clone())
    }
}
