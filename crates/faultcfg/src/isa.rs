//! Instruction set classification.

use std::fmt;

use faultcfg_elf::{CPU_NAME_ARMV6M, CPU_NAME_ARMV7M, TAG_CPU_NAME, parse_cpu_name};

use crate::{Error, Result};

/// ARM M-profile variant the engine emulates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IsaVariant {
    ArmV6M,
    ArmV7M,
}

impl IsaVariant {
    /// Classify a binary from its `readelf -A` listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMetadata`] if `Tag_CPU_name` is absent, or
    /// [`Error::UnsupportedArchitecture`] if its value is anything other
    /// than `"6-M"` or `"7-M"`.
    pub fn classify(attributes: &str) -> Result<Self> {
        let name = parse_cpu_name(attributes).ok_or(Error::MissingMetadata(TAG_CPU_NAME))?;
        match name.as_str() {
            CPU_NAME_ARMV6M => Ok(Self::ArmV6M),
            CPU_NAME_ARMV7M => Ok(Self::ArmV7M),
            _ => Err(Error::UnsupportedArchitecture(name)),
        }
    }

    /// Engine flag selecting this variant.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::ArmV6M => "--armv6m",
            Self::ArmV7M => "--armv7m",
        }
    }
}

impl fmt::Display for IsaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArmV6M => f.write_str("ARMv6-M"),
            Self::ArmV7M => f.write_str("ARMv7-M"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(cpu: &str) -> String {
        format!("Attribute Section: aeabi\nFile Attributes\n  Tag_CPU_name: {cpu}\n  Tag_CPU_arch: v7\n")
    }

    #[test]
    fn test_classify_supported() {
        assert_eq!(IsaVariant::classify(&attrs("\"6-M\"")).unwrap(), IsaVariant::ArmV6M);
        assert_eq!(IsaVariant::classify(&attrs("\"7-M\"")).unwrap(), IsaVariant::ArmV7M);
    }

    #[test]
    fn test_classify_unsupported() {
        for cpu in ["\"7E-M\"", "\"cortex-m4\"", "7-M", "\"8-M.MAIN\"", ""] {
            assert!(
                matches!(
                    IsaVariant::classify(&attrs(cpu)),
                    Err(Error::UnsupportedArchitecture(_))
                ),
                "{cpu} should be rejected"
            );
        }
    }

    #[test]
    fn test_classify_missing_tag() {
        let result = IsaVariant::classify("File Attributes\n  Tag_CPU_arch: v6S-M\n");
        assert!(matches!(result, Err(Error::MissingMetadata("Tag_CPU_name"))));
    }

    #[test]
    fn test_flags() {
        assert_eq!(IsaVariant::ArmV6M.flag(), "--armv6m");
        assert_eq!(IsaVariant::ArmV7M.flag(), "--armv7m");
    }
}
