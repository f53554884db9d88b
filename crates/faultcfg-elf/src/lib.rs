//! Typed readers for ARM binutils output and GNU ld map files.
//!
//! Every assumption about the textual formats produced by `readelf -A`,
//! `objdump -t`, `objdump -h` and `ld -Map` lives in this crate. Callers get
//! [`Symbol`], [`SectionHeader`] and [`MemoryRegion`] values and never touch
//! raw tokens.

mod attributes;
mod constants;
mod extract;
mod header;
pub mod hex;
mod map;
mod sections;
mod source;
mod symtab;
mod tool;

pub use attributes::parse_cpu_name;
pub use constants::*;
pub use extract::{Objcopy, SectionExtractor};
pub use header::*;
pub use map::parse_memory_regions;
pub use sections::parse_section_headers;
pub use source::{Binutils, InMemorySource, MetadataSource};
pub use symtab::parse_symbol_table;
pub use tool::{ToolFailure, Toolchain};

use thiserror::Error;

/// Metadata access and parsing errors.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    ToolFailed(#[from] ToolFailure),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed section header line: {0}")]
    MalformedSectionHeader(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
