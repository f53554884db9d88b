//! `readelf -A` attribute section reader.

use std::sync::OnceLock;

use regex::Regex;

/// Extract the raw `Tag_CPU_name` value (quotes kept, whitespace trimmed).
///
/// Returns `None` when the tag is not present at all.
#[must_use]
pub fn parse_cpu_name(text: &str) -> Option<String> {
    let pattern = CPU_NAME_PATTERN
        .get_or_init(|| Regex::new(r"Tag_CPU_name:[ \t]*([^\r\n]*)").unwrap());
    let caps = pattern.captures(text)?;
    Some(caps.get(1)?.as_str().trim().to_string())
}

static CPU_NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

#[cfg(test)]
mod tests {
    use super::*;

    const READELF_V7M: &str = "Attribute Section: aeabi\n\
File Attributes\n  \
  Tag_CPU_name: \"7-M\"\n  \
  Tag_CPU_arch: v7\n  \
  Tag_CPU_arch_profile: Microcontroller\n  \
  Tag_THUMB_ISA_use: Thumb-2\n";

    #[test]
    fn test_cpu_name_found() {
        assert_eq!(parse_cpu_name(READELF_V7M).as_deref(), Some("\"7-M\""));
    }

    #[test]
    fn test_cpu_name_at_end_without_newline() {
        let text = "File Attributes\n  Tag_CPU_name: \"6-M\"";
        assert_eq!(parse_cpu_name(text).as_deref(), Some("\"6-M\""));
    }

    #[test]
    fn test_cpu_name_missing() {
        let text = "Attribute Section: aeabi\nFile Attributes\n  Tag_CPU_arch: v6S-M\n";
        assert_eq!(parse_cpu_name(text), None);
    }

    #[test]
    fn test_cpu_name_empty_value() {
        assert_eq!(parse_cpu_name("  Tag_CPU_name:\n").as_deref(), Some(""));
    }
}
