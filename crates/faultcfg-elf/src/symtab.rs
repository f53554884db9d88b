//! `objdump -t` symbol table reader.

use crate::constants::{SYMBOL_KIND_FUNCTION, SYMBOL_KIND_OBJECT, SYMBOL_MIN_TOKENS};
use crate::header::{Symbol, SymbolKind};
use crate::hex::parse_hex;

/// Parse a symbol listing into symbols sorted by address.
///
/// A row is a symbol when it has at least three whitespace-separated tokens
/// and the first one is hex. The third token is the type column and the
/// last token is the name. Rows at the same address keep the order of their
/// full text, compared lexicographically.
#[must_use]
pub fn parse_symbol_table(text: &str) -> Vec<Symbol> {
    let mut rows: Vec<(Symbol, &str)> = text
        .lines()
        .filter_map(|line| parse_row(line).map(|sym| (sym, line)))
        .collect();

    rows.sort_by(|(a, a_line), (b, b_line)| {
        a.address.cmp(&b.address).then_with(|| a_line.cmp(b_line))
    });

    rows.into_iter().map(|(sym, _)| sym).collect()
}

fn parse_row(line: &str) -> Option<Symbol> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < SYMBOL_MIN_TOKENS {
        return None;
    }
    let address = parse_hex(parts[0])?;
    let kind = match parts[2] {
        SYMBOL_KIND_FUNCTION => SymbolKind::Function,
        SYMBOL_KIND_OBJECT => SymbolKind::Object,
        _ => SymbolKind::Other,
    };
    let name = parts.last()?;
    Some(Symbol::new(address, kind, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBJDUMP_T: &str = "
binary.elf:     file format elf32-littlearm

SYMBOL TABLE:
08000000 l    d  .text\t00000000 .text
20000000 l    d  .bss\t00000000 .bss
00000000 l    df *ABS*\t00000000 example.c
20000000 g     O .bss\t00000020 secret_buffer
08000040 g     F .text\t0000001c super_secret_function
08000010 g     F .text\t0000002e interesting_to_fault
0800005c g       .text\t00000000 _etext
";

    #[test]
    fn test_parse_kinds_and_names() {
        let symbols = parse_symbol_table(OBJDUMP_T);
        let find = |name: &str| symbols.iter().find(|s| s.name == name).unwrap();

        assert_eq!(find("secret_buffer").kind, SymbolKind::Object);
        assert_eq!(find("secret_buffer").address, 0x2000_0000);
        assert_eq!(find("interesting_to_fault").kind, SymbolKind::Function);
        assert_eq!(find("_etext").kind, SymbolKind::Other);
        assert_eq!(find("example.c").kind, SymbolKind::Other);
    }

    #[test]
    fn test_header_rows_skipped() {
        let symbols = parse_symbol_table(OBJDUMP_T);
        assert_eq!(symbols.len(), 7);
        assert!(symbols.iter().all(|s| s.name != "elf32-littlearm"));
    }

    #[test]
    fn test_sorted_numerically() {
        let text = "1000 g F .text 0 big\n800 g F .text 0 small\n";
        let names: Vec<_> = parse_symbol_table(text)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["small", "big"]);
    }

    #[test]
    fn test_ties_broken_by_line_text() {
        let symbols = parse_symbol_table(OBJDUMP_T);
        let at_ram: Vec<_> = symbols
            .iter()
            .filter(|s| s.address == 0x2000_0000)
            .map(|s| s.name.as_str())
            .collect();
        // "20000000 g ..." sorts before "20000000 l ..."
        assert_eq!(at_ram, ["secret_buffer", ".bss"]);
    }
}
