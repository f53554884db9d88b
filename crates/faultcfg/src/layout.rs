//! Flash and RAM layout from the linker map.

use faultcfg_elf::hex::Hex;
use faultcfg_elf::{MemoryRegion, RegionKind, parse_memory_regions};
use tracing::info;

use crate::{Error, Result};

/// Validated memory layout of the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLayout {
    pub flash: MemoryRegion,
    pub ram: MemoryRegion,
}

impl MemoryLayout {
    /// Extract the layout from linker map text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMemoryRegion`] if the map has no `flash` or
    /// no `ram` line, or if either has zero length.
    pub fn from_map(map: &str) -> Result<Self> {
        let regions = parse_memory_regions(map);
        let require = |region: Option<MemoryRegion>, kind| {
            region
                .filter(|r| r.length != 0)
                .ok_or(Error::MissingMemoryRegion(kind))
        };

        let layout = Self {
            flash: require(regions.flash, RegionKind::Flash)?,
            ram: require(regions.ram, RegionKind::Ram)?,
        };
        info!(
            flash_origin = %Hex(layout.flash.origin),
            flash_length = %Hex(layout.flash.length),
            ram_origin = %Hex(layout.ram.origin),
            ram_length = %Hex(layout.ram.length),
            "memory layout"
        );
        Ok(layout)
    }

    /// Exclusive upper bound of flash.
    #[must_use]
    pub const fn end_of_flash(&self) -> u64 {
        self.flash.end()
    }
}
