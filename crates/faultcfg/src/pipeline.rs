//! Derivation pipeline: classify, lay out, analyze symbols, extract sections.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use faultcfg_elf::{MetadataSource, SectionExtractor, parse_section_headers, parse_symbol_table};
use tempfile::TempDir;
use tracing::info;

use crate::Result;
use crate::config::FaultConfig;
use crate::engine::{self, EngineArgs};
use crate::isa::IsaVariant;
use crate::layout::MemoryLayout;
use crate::options::DeriveOptions;
use crate::sections::{LoadableSection, clear_stale_blobs, loadable_sections, materialize};
use crate::symbols::SymbolAnalysis;

/// Everything known about the binary before any section is extracted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    pub isa: IsaVariant,
    pub layout: MemoryLayout,
    pub symbols: SymbolAnalysis,
    pub sections: Vec<LoadableSection>,
}

/// Directory receiving extracted section blobs.
#[derive(Debug)]
pub enum SectionDir {
    /// Removed when dropped, whether the run succeeded or not.
    Temporary(TempDir),
    /// Owned by the caller and left in place.
    Persistent(PathBuf),
}

impl SectionDir {
    /// Create a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("faultcfg-").tempdir()?;
        Ok(Self::Temporary(dir))
    }

    /// Use (and create if needed) a caller-owned directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn persistent(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        Ok(Self::Persistent(path.to_path_buf()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Temporary(dir) => dir.path(),
            Self::Persistent(path) => path,
        }
    }
}

/// Fault configuration deriver.
#[derive(Clone, Debug)]
pub struct Deriver {
    options: DeriveOptions,
}

impl Deriver {
    #[must_use]
    pub const fn new(options: DeriveOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &DeriveOptions {
        &self.options
    }

    /// Run every stage that only reads metadata.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure: unsupported or missing architecture,
    /// missing memory region, missing start or halt symbol, or a metadata
    /// tool failure.
    pub fn analyze(&self, source: &impl MetadataSource) -> Result<Analysis> {
        let isa = IsaVariant::classify(&source.attributes()?)?;
        info!(%isa, "classified binary");

        let layout = MemoryLayout::from_map(&source.linker_map()?)?;

        let symbols = parse_symbol_table(&source.symbol_table()?);
        let symbols = SymbolAnalysis::analyze(&symbols, &self.options, layout.end_of_flash())?;

        let headers = parse_section_headers(&source.section_headers()?)?;
        let sections = loadable_sections(&headers);
        info!(count = sections.len(), "loadable sections");

        Ok(Analysis {
            isa,
            layout,
            symbols,
            sections,
        })
    }

    /// Derive the full configuration, extracting sections into `dir`.
    ///
    /// Section files from an earlier derivation are cleared first. If
    /// extraction fails, no section file is left in `dir`.
    ///
    /// # Errors
    ///
    /// Returns any [`Self::analyze`] failure, or
    /// [`crate::Error::ExternalToolFailure`] if a section cannot be extracted.
    pub fn derive(
        &self,
        source: &impl MetadataSource,
        extractor: &impl SectionExtractor,
        dir: &Path,
    ) -> Result<FaultConfig> {
        let analysis = self.analyze(source)?;
        clear_stale_blobs(dir)?;
        let sections = materialize(&analysis.sections, extractor, dir)?;

        Ok(FaultConfig {
            isa: analysis.isa,
            layout: analysis.layout,
            start: analysis.symbols.start,
            halts: analysis.symbols.halts,
            ignores: analysis.symbols.ignores,
            sections,
            timeout: self.options.timeout,
        })
    }

    /// Derive into a temporary directory and run the engine on the result.
    ///
    /// The directory is removed before returning, on every path.
    ///
    /// # Errors
    ///
    /// Returns any [`Self::derive`] failure, [`crate::Error::InvalidArguments`]
    /// if the generated arguments do not satisfy the engine, or
    /// [`crate::Error::EngineLaunch`] if the engine cannot be started.
    pub fn run(
        &self,
        source: &impl MetadataSource,
        extractor: &impl SectionExtractor,
        engine_path: &Path,
    ) -> Result<ExitStatus> {
        let dir = SectionDir::temporary()?;
        let config = self.derive(source, extractor, dir.path())?;
        let args = config.to_args();
        EngineArgs::parse(&args)?;
        engine::launch(engine_path, &args)
    }
}
