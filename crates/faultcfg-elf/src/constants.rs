//! Literals of the binutils and GNU ld text formats.

// Toolchain
pub const DEFAULT_TOOLCHAIN_PREFIX: &str = "arm-none-eabi-";
pub const READELF: &str = "readelf";
pub const OBJDUMP: &str = "objdump";
pub const OBJCOPY: &str = "objcopy";

// readelf -A
pub const TAG_CPU_NAME: &str = "Tag_CPU_name";
pub const CPU_NAME_ARMV6M: &str = "\"6-M\"";
pub const CPU_NAME_ARMV7M: &str = "\"7-M\"";

// ld -Map memory configuration
pub const MAP_REGION_FLASH: &str = "flash";
pub const MAP_REGION_RAM: &str = "ram";

// objdump -t type column
pub const SYMBOL_KIND_FUNCTION: &str = "F";
pub const SYMBOL_KIND_OBJECT: &str = "O";
pub const SYMBOL_MIN_TOKENS: usize = 3;

// objdump -h
pub const SECTION_HEADER_TOKENS: usize = 7;
pub const SECTION_NAME_PREFIX: char = '.';
pub const SECTION_FLAG_ALLOC: &str = "ALLOC";

/// File name prefix for extracted section blobs (`code_section.text`).
pub const SECTION_FILE_PREFIX: &str = "code_section";
