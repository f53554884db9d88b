//! Start, halt and ignore-range discovery over the sorted symbol table.
//!
//! The analysis is a single pass in address order. Data objects and
//! explicitly ignored symbols open an ignore span; the span stays open until
//! the next function entry that is not itself ignored, because control only
//! returns to code worth faulting at a function boundary. A span that is
//! still open after the last symbol runs to the end of flash.

use faultcfg_elf::Symbol;
use faultcfg_elf::hex::Hex;
use tracing::{debug, info};

use crate::options::DeriveOptions;
use crate::{Error, Result};

/// Half-open address range `[start, end)` the engine must not fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IgnoreRange {
    pub start: u64,
    pub end: u64,
}

impl IgnoreRange {
    /// Build a range, rejecting empty or inverted bounds.
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Option<Self> {
        if end > start {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

/// Address at which a run counts as successfully halted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HaltAddress {
    pub label: String,
    pub address: u64,
}

/// State of the ignore span during the pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum IgnoreSpan {
    #[default]
    Closed,
    Open {
        start: u64,
    },
}

impl IgnoreSpan {
    const fn is_open(self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Close the span at a function entry. The end never exceeds flash.
    fn close_at(&mut self, address: u64, end_of_flash: u64) -> Option<IgnoreRange> {
        self.take_range(address.min(end_of_flash))
    }

    /// Close a span left open after the last symbol.
    fn finish(&mut self, end_of_flash: u64) -> Option<IgnoreRange> {
        self.take_range(end_of_flash)
    }

    fn take_range(&mut self, end: u64) -> Option<IgnoreRange> {
        let Self::Open { start } = std::mem::take(self) else {
            return None;
        };
        let range = IgnoreRange::new(start, end);
        if range.is_none() {
            debug!(start = %Hex(start), end = %Hex(end), "dropping empty ignore span");
        }
        range
    }
}

/// Result of the symbol pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolAnalysis {
    pub start: u64,
    pub halts: Vec<HaltAddress>,
    pub ignores: Vec<IgnoreRange>,
}

impl SymbolAnalysis {
    /// Run the pass over symbols sorted by address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingStartSymbol`] if the start symbol never
    /// appears, or [`Error::MissingHaltSymbol`] if no halt symbol does.
    pub fn analyze(symbols: &[Symbol], options: &DeriveOptions, end_of_flash: u64) -> Result<Self> {
        let mut span = IgnoreSpan::Closed;
        let mut start = None;
        let mut halts = Vec::new();
        let mut ignores = Vec::new();

        for sym in symbols {
            if span.is_open() && sym.is_function() && !options.is_ignored(&sym.name) {
                ignores.extend(span.close_at(sym.address, end_of_flash));
            }

            if sym.name == options.start_symbol {
                debug!(name = %sym.name, address = %Hex(sym.address), "start symbol");
                start = Some(sym.address);
            } else if options.is_halt(&sym.name) {
                debug!(name = %sym.name, address = %Hex(sym.address), "halt symbol");
                halts.push(HaltAddress {
                    label: sym.name.clone(),
                    address: sym.address,
                });
            } else if (options.is_ignored(&sym.name) || sym.is_object()) && !span.is_open() {
                debug!(name = %sym.name, address = %Hex(sym.address), "opening ignore span");
                span = IgnoreSpan::Open { start: sym.address };
            }
        }
        ignores.extend(span.finish(end_of_flash));

        let start = start.ok_or_else(|| Error::MissingStartSymbol(options.start_symbol.clone()))?;
        if halts.is_empty() {
            return Err(Error::MissingHaltSymbol(options.halt_symbols.clone()));
        }

        info!(
            start = %Hex(start),
            halts = halts.len(),
            ignores = ignores.len(),
            "analyzed symbols"
        );
        Ok(Self {
            start,
            halts,
            ignores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultcfg_elf::SymbolKind::{Function, Object, Other};

    const END_OF_FLASH: u64 = 0x1000;

    fn options() -> DeriveOptions {
        DeriveOptions::new("start").with_halt_symbols(["halt"])
    }

    fn base() -> Vec<Symbol> {
        vec![
            Symbol::new(0x10, Function, "start"),
            Symbol::new(0x20, Function, "halt"),
        ]
    }

    fn with(mut symbols: Vec<Symbol>, extra: &[Symbol]) -> Vec<Symbol> {
        symbols.extend_from_slice(extra);
        symbols.sort_by_key(|s| s.address);
        symbols
    }

    #[test]
    fn test_start_and_halt() {
        let analysis = SymbolAnalysis::analyze(&base(), &options(), END_OF_FLASH).unwrap();
        assert_eq!(analysis.start, 0x10);
        assert_eq!(
            analysis.halts,
            [HaltAddress {
                label: "halt".into(),
                address: 0x20
            }]
        );
        assert!(analysis.ignores.is_empty());
    }

    #[test]
    fn test_start_and_halt_independent_of_order() {
        let symbols = vec![
            Symbol::new(0x10, Function, "halt"),
            Symbol::new(0x20, Function, "start"),
        ];
        let analysis = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH).unwrap();
        assert_eq!(analysis.start, 0x20);
        assert_eq!(analysis.halts[0].address, 0x10);
    }

    #[test]
    fn test_object_closed_by_function() {
        let symbols = with(
            base(),
            &[
                Symbol::new(0x100, Object, "table"),
                Symbol::new(0x120, Function, "after"),
            ],
        );
        let analysis = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH).unwrap();
        assert_eq!(
            analysis.ignores,
            [IgnoreRange {
                start: 0x100,
                end: 0x120
            }]
        );
    }

    #[test]
    fn test_trailing_span_ends_at_flash_end() {
        let symbols = with(
            base(),
            &[
                Symbol::new(0x100, Object, "table"),
                Symbol::new(0x200, Other, "_etext"),
            ],
        );
        let analysis = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH).unwrap();
        assert_eq!(
            analysis.ignores,
            [IgnoreRange {
                start: 0x100,
                end: END_OF_FLASH
            }]
        );
    }

    #[test]
    fn test_close_clamped_to_flash_end() {
        let symbols = with(
            base(),
            &[
                Symbol::new(0x800, Object, "table"),
                Symbol::new(0x2000, Function, "in_ram"),
            ],
        );
        let analysis = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH).unwrap();
        assert_eq!(
            analysis.ignores,
            [IgnoreRange {
                start: 0x800,
                end: END_OF_FLASH
            }]
        );
    }

    #[test]
    fn test_span_beyond_flash_dropped() {
        let symbols = with(base(), &[Symbol::new(0x2000_0000, Object, "buffer")]);
        let analysis = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH).unwrap();
        assert!(analysis.ignores.is_empty());
    }

    #[test]
    fn test_consecutive_objects_share_one_span() {
        let symbols = with(
            base(),
            &[
                Symbol::new(0x100, Object, "a"),
                Symbol::new(0x110, Object, "b"),
                Symbol::new(0x118, Other, "$d"),
                Symbol::new(0x130, Function, "f"),
            ],
        );
        let analysis = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH).unwrap();
        assert_eq!(
            analysis.ignores,
            [IgnoreRange {
                start: 0x100,
                end: 0x130
            }]
        );
    }

    #[test]
    fn test_ignored_function_extends_span() {
        let opts = options().with_ignore_symbols(["helper", "memcpy"]);
        let symbols = with(
            base(),
            &[
                Symbol::new(0x100, Function, "helper"),
                Symbol::new(0x140, Function, "memcpy"),
                Symbol::new(0x180, Function, "normal"),
                Symbol::new(0x200, Object, "table"),
                Symbol::new(0x240, Function, "tail"),
            ],
        );
        let analysis = SymbolAnalysis::analyze(&symbols, &opts, END_OF_FLASH).unwrap();
        assert_eq!(
            analysis.ignores,
            [
                IgnoreRange {
                    start: 0x100,
                    end: 0x180
                },
                IgnoreRange {
                    start: 0x200,
                    end: 0x240
                },
            ]
        );
    }

    #[test]
    fn test_start_symbol_closes_span() {
        let symbols = vec![
            Symbol::new(0x8, Object, "table"),
            Symbol::new(0x10, Function, "start"),
            Symbol::new(0x20, Function, "halt"),
        ];
        let analysis = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH).unwrap();
        assert_eq!(analysis.ignores, [IgnoreRange { start: 0x8, end: 0x10 }]);
    }

    #[test]
    fn test_object_halt_is_not_ignored() {
        let symbols = vec![
            Symbol::new(0x10, Function, "start"),
            Symbol::new(0x20, Object, "halt"),
        ];
        let analysis = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH).unwrap();
        assert_eq!(analysis.halts.len(), 1);
        assert!(analysis.ignores.is_empty());
    }

    #[test]
    fn test_duplicate_halts_retained() {
        let opts = options().with_halt_symbols(["other_halt"]);
        let symbols = with(
            base(),
            &[
                Symbol::new(0x30, Function, "halt"),
                Symbol::new(0x40, Function, "other_halt"),
            ],
        );
        let analysis = SymbolAnalysis::analyze(&symbols, &opts, END_OF_FLASH).unwrap();
        let halts: Vec<_> = analysis
            .halts
            .iter()
            .map(|h| (h.label.as_str(), h.address))
            .collect();
        assert_eq!(halts, [("halt", 0x20), ("halt", 0x30), ("other_halt", 0x40)]);
    }

    #[test]
    fn test_missing_start() {
        let symbols = vec![Symbol::new(0x20, Function, "halt")];
        let result = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH);
        assert!(matches!(result, Err(Error::MissingStartSymbol(name)) if name == "start"));
    }

    #[test]
    fn test_missing_halt() {
        let symbols = vec![Symbol::new(0x10, Function, "start")];
        let result = SymbolAnalysis::analyze(&symbols, &options(), END_OF_FLASH);
        assert!(matches!(result, Err(Error::MissingHaltSymbol(names)) if names == ["halt"]));
    }

    #[test]
    fn test_span_state_machine() {
        let mut span = IgnoreSpan::Closed;
        assert_eq!(span.close_at(0x10, END_OF_FLASH), None);
        assert_eq!(span.finish(END_OF_FLASH), None);

        span = IgnoreSpan::Open { start: 0x10 };
        assert_eq!(
            span.close_at(0x20, END_OF_FLASH),
            IgnoreRange::new(0x10, 0x20)
        );
        assert_eq!(span, IgnoreSpan::Closed);

        span = IgnoreSpan::Open { start: 0x10 };
        assert_eq!(span.finish(END_OF_FLASH), IgnoreRange::new(0x10, END_OF_FLASH));
        assert!(!span.is_open());
    }
}
