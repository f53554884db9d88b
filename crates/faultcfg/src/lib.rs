//! faultcfg - fault-injection configuration for ARM Cortex-M binaries
//!
//! Reads a compiled ELF and its linker map, decides what the fault
//! simulation engine needs (entry point, halt points, ignored address
//! ranges, memory regions, loadable sections, ISA) and renders it as the
//! engine's argument list.
//!
//! # Example
//!
//! ```ignore
//! use faultcfg::{Binutils, DeriveOptions, Deriver, Objcopy, Toolchain};
//!
//! let options = DeriveOptions::new("main").with_halt_symbol("super_secret_function");
//! let toolchain = Toolchain::default();
//! let source = Binutils::new(toolchain.clone(), "firmware.elf".as_ref(), "firmware.map".as_ref());
//! let extractor = Objcopy::new(toolchain, "firmware.elf".as_ref());
//! let config = Deriver::new(options).derive(&source, &extractor, "out".as_ref())?;
//! println!("{config}");
//! ```

// Re-export from the metadata crate
pub use faultcfg_elf::{
    Binutils, DEFAULT_TOOLCHAIN_PREFIX, InMemorySource, MemoryRegion, MetadataError,
    MetadataSource, Objcopy, RegionKind, SectionExtractor, Symbol, SymbolKind, ToolFailure,
    Toolchain,
};

mod config;
mod engine;
mod error;
mod isa;
mod layout;
mod options;
mod pipeline;
mod sections;
mod symbols;

pub use config::FaultConfig;
pub use engine::{EngineArgs, launch};
pub use error::{Error, Result};
pub use isa::IsaVariant;
pub use layout::MemoryLayout;
pub use options::DeriveOptions;
pub use pipeline::{Analysis, Deriver, SectionDir};
pub use sections::{
    LoadableSection, SectionBlob, blob_path, clear_stale_blobs, loadable_sections, materialize,
};
pub use symbols::{HaltAddress, IgnoreRange, SymbolAnalysis};
