//! GNU ld map file reader.

use tracing::trace;

use crate::constants::{MAP_REGION_FLASH, MAP_REGION_RAM};
use crate::header::{MapRegions, MemoryRegion};
use crate::hex::parse_hex;

/// Collect the `flash` and `ram` lines of the memory configuration.
///
/// Matches lines of the form `<name> <origin> <length> [attributes]`. A later
/// line for the same region overwrites an earlier one. Lines whose origin or
/// length is not hex are skipped.
#[must_use]
pub fn parse_memory_regions(text: &str) -> MapRegions {
    let mut regions = MapRegions::default();

    for line in text.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }
        let slot = match parts[0] {
            MAP_REGION_FLASH => &mut regions.flash,
            MAP_REGION_RAM => &mut regions.ram,
            _ => continue,
        };
        match (parse_hex(parts[1]), parse_hex(parts[2])) {
            (Some(origin), Some(length)) => *slot = Some(MemoryRegion { origin, length }),
            _ => trace!(line, "skipping map line with non-hex region bounds"),
        }
    }

    regions
}
