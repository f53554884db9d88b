//! `objdump -h` section header reader.

use std::collections::VecDeque;

use crate::constants::{SECTION_HEADER_TOKENS, SECTION_NAME_PREFIX};
use crate::header::SectionHeader;
use crate::hex::parse_hex;
use crate::{MetadataError, Result};

/// Parse a section header listing.
///
/// objdump prints each section as a header row
/// `<idx> <name> <size> <vma> <lma> <file off> <align>` followed by a row of
/// comma-separated attributes. The pairing is positional: the line after a
/// header row is always taken as its attributes.
///
/// # Errors
///
/// Returns [`MetadataError::MalformedSectionHeader`] if a header row carries
/// a size or address that is not hex.
pub fn parse_section_headers(text: &str) -> Result<Vec<SectionHeader>> {
    let mut lines: VecDeque<&str> = text.lines().collect();
    let mut headers = Vec::new();

    while let Some(line) = lines.pop_front() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != SECTION_HEADER_TOKENS || !parts[1].starts_with(SECTION_NAME_PREFIX) {
            continue;
        }

        let field = |idx: usize| {
            parse_hex(parts[idx])
                .ok_or_else(|| MetadataError::MalformedSectionHeader(line.to_string()))
        };
        let size = field(2)?;
        let vma = field(3)?;
        let lma = field(4)?;
        let file_offset = field(5)?;

        let flags = lines
            .pop_front()
            .map(|attrs| {
                attrs
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        headers.push(SectionHeader {
            name: parts[1].to_string(),
            size,
            vma,
            lma,
            file_offset,
            flags,
        });
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBJDUMP_H: &str = "
binary.elf:     file format elf32-littlearm

Sections:
Idx Name          Size      VMA       LMA       File off  Algn
  0 .text         0000005c  08000000  08000000  00010000  2**2
                  CONTENTS, ALLOC, LOAD, READONLY, CODE
  1 .bss          00000020  20000000  20000000  00020000  2**2
                  ALLOC
  2 .comment      00000033  00000000  00000000  0001005c  2**0
                  CONTENTS, READONLY
  3 .ARM.attributes 0000002d  00000000  00000000  0001008f  2**0
                  CONTENTS, READONLY
";

    #[test]
    fn test_parse_headers() {
        let headers = parse_section_headers(OBJDUMP_H).unwrap();
        let names: Vec<_> = headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, [".text", ".bss", ".comment", ".ARM.attributes"]);

        let text = &headers[0];
        assert_eq!(text.size, 0x5c);
        assert_eq!(text.vma, 0x0800_0000);
        assert_eq!(text.lma, 0x0800_0000);
        assert_eq!(text.file_offset, 0x1_0000);
        assert!(text.is_alloc());
        assert!(headers[1].is_alloc());
        assert!(!headers[2].is_alloc());
    }

    #[test]
    fn test_column_header_row_is_not_a_section() {
        // "Idx Name Size VMA LMA File off Algn" also has seven tokens.
        let headers = parse_section_headers(OBJDUMP_H).unwrap();
        assert!(headers.iter().all(|h| h.name != "Name"));
    }

    #[test]
    fn test_attribute_line_consumed_positionally() {
        let text = "  0 .a 00000004 00000000 00000000 00000034 2**0\n  1 .b 00000004 00000004 00000004 00000038 2**0\n";
        // ".b" is eaten as the attribute line of ".a".
        let headers = parse_section_headers(text).unwrap();
        assert_eq!(headers.len(), 1);
        assert!(!headers[0].is_alloc());
    }

    #[test]
    fn test_missing_attribute_line() {
        let text = "  0 .text 00000004 08000000 08000000 00010000 2**2";
        let headers = parse_section_headers(text).unwrap();
        assert!(headers[0].flags.is_empty());
    }

    #[test]
    fn test_malformed_size() {
        let text = "  0 .text zzzz 08000000 08000000 00010000 2**2\n  ALLOC\n";
        assert!(matches!(
            parse_section_headers(text),
            Err(MetadataError::MalformedSectionHeader(_))
        ));
    }
}
