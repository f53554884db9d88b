use rustc_hash::FxHashSet;

/// Symbol names and engine settings that steer a derivation.
#[derive(Clone, Debug, Default)]
pub struct DeriveOptions {
    /// Symbol whose address becomes the start address.
    pub start_symbol: String,
    /// Symbols marking successful termination.
    pub halt_symbols: Vec<String>,
    /// Symbols whose code must not be faulted.
    pub ignore_symbols: FxHashSet<String>,
    /// Engine emulation timeout in clock cycles.
    pub timeout: Option<u64>,
    halt_set: FxHashSet<String>,
}

impl DeriveOptions {
    /// Create options for the given start symbol.
    #[must_use]
    pub fn new(start_symbol: &str) -> Self {
        Self {
            start_symbol: start_symbol.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_halt_symbol(mut self, name: &str) -> Self {
        if self.halt_set.insert(name.to_string()) {
            self.halt_symbols.push(name.to_string());
        }
        self
    }

    #[must_use]
    pub fn with_halt_symbols<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .fold(self, |opts, name| opts.with_halt_symbol(name.as_ref()))
    }

    #[must_use]
    pub fn with_ignore_symbols<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore_symbols
            .extend(names.into_iter().map(|n| n.as_ref().to_string()));
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn is_halt(&self, name: &str) -> bool {
        self.halt_set.contains(name)
    }

    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_symbols.contains(name)
    }
}
