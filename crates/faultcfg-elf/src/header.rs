//! Records produced by the text readers.

use std::fmt;

/// A contiguous memory region from the linker map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryRegion {
    pub origin: u64,
    pub length: u64,
}

impl MemoryRegion {
    /// Exclusive end address (`origin + length`).
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.origin.saturating_add(self.length)
    }
}

/// Named memory regions of the map's memory configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    Flash,
    Ram,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flash => f.write_str("flash"),
            Self::Ram => f.write_str("ram"),
        }
    }
}

/// Regions found in a linker map. `None` when the map never mentions one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapRegions {
    pub flash: Option<MemoryRegion>,
    pub ram: Option<MemoryRegion>,
}

/// Symbol type as reported in the `objdump -t` type column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Object,
    Other,
}

/// Symbol table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// Symbol value (address).
    pub address: u64,
    pub kind: SymbolKind,
    /// Last column of the row.
    pub name: String,
}

impl Symbol {
    #[must_use]
    pub fn new(address: u64, kind: SymbolKind, name: &str) -> Self {
        Self {
            address,
            kind,
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        self.kind == SymbolKind::Function
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.kind == SymbolKind::Object
    }
}

/// Section header row paired with its attribute line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionHeader {
    pub name: String,
    pub size: u64,
    /// Virtual (run-time) address.
    pub vma: u64,
    /// Load address.
    pub lma: u64,
    pub file_offset: u64,
    /// Attribute flags (`CONTENTS`, `ALLOC`, `LOAD`, ...).
    pub flags: Vec<String>,
}

impl SectionHeader {
    /// Check if the section occupies memory at run time.
    #[must_use]
    pub fn is_alloc(&self) -> bool {
        self.flags.iter().any(|f| f == crate::SECTION_FLAG_ALLOC)
    }
}
