use faultcfg_elf::{MetadataError, RegionKind, ToolFailure};
use thiserror::Error;

/// Derivation errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("'{0}' is missing in the ELF attributes")]
    MissingMetadata(&'static str),
    #[error("{0} is not an ARMv6-M or ARMv7-M binary")]
    UnsupportedArchitecture(String),
    #[error("{0} region could not be found in map file")]
    MissingMemoryRegion(RegionKind),
    #[error("start symbol '{0}' could not be found in the symbol table")]
    MissingStartSymbol(String),
    #[error("no halt symbol ({}) could be found in the symbol table", .0.join(", "))]
    MissingHaltSymbol(Vec<String>),
    #[error("external tool failed: {0}")]
    ExternalToolFailure(ToolFailure),
    #[error("metadata error: {0}")]
    Metadata(MetadataError),
    #[error("invalid engine arguments: {0}")]
    InvalidArguments(String),
    #[error("failed to launch engine {path}: {source}")]
    EngineLaunch {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MetadataError> for Error {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::ToolFailed(failure) => Self::ExternalToolFailure(failure),
            other => Self::Metadata(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
