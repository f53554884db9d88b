//! Loadable section enumeration and extraction.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use faultcfg_elf::hex::Hex;
use faultcfg_elf::{SECTION_FILE_PREFIX, SectionExtractor, SectionHeader};
use tracing::{debug, info, warn};

use crate::Result;

/// Section that must be loaded into the emulated memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadableSection {
    pub name: String,
    pub load_address: u64,
}

/// Section bytes materialized on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionBlob {
    pub name: String,
    pub load_address: u64,
    /// Raw section contents.
    pub path: PathBuf,
}

/// Keep allocatable sections with a non-zero size, in header order.
#[must_use]
pub fn loadable_sections(headers: &[SectionHeader]) -> Vec<LoadableSection> {
    headers
        .iter()
        .filter(|h| {
            let keep = h.is_alloc() && h.size != 0;
            if !keep {
                debug!(name = %h.name, size = h.size, alloc = h.is_alloc(), "skipping section");
            } else if h.lma != h.vma {
                debug!(
                    name = %h.name,
                    vma = %Hex(h.vma),
                    lma = %Hex(h.lma),
                    "loading at run-time address"
                );
            }
            keep
        })
        .map(|h| LoadableSection {
            name: h.name.clone(),
            load_address: h.vma,
        })
        .collect()
}

/// Path of the blob file for a section inside `dir`.
#[must_use]
pub fn blob_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{SECTION_FILE_PREFIX}{name}"))
}

/// Remove section files left in `dir` by an earlier derivation.
///
/// A missing directory has nothing to clear.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or a file cannot be
/// removed.
pub fn clear_stale_blobs(dir: &Path) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        let is_blob = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(SECTION_FILE_PREFIX));
        if is_blob && entry.file_type()?.is_file() {
            debug!(path = %entry.path().display(), "removing stale section file");
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// Extract every section into `dir`, one extractor call per section.
///
/// On failure every file written so far is removed again, including
/// whatever the failing extraction left behind.
///
/// # Errors
///
/// Fails on the first section the extractor cannot produce.
pub fn materialize(
    sections: &[LoadableSection],
    extractor: &impl SectionExtractor,
    dir: &Path,
) -> Result<Vec<SectionBlob>> {
    let mut blobs: Vec<SectionBlob> = Vec::with_capacity(sections.len());
    for section in sections {
        let path = blob_path(dir, &section.name);
        if let Err(e) = extractor.extract(&section.name, &path) {
            discard(blobs.iter().map(|b| b.path.as_path()).chain([path.as_path()]));
            return Err(e.into());
        }
        debug!(
            name = %section.name,
            address = %Hex(section.load_address),
            path = %path.display(),
            "extracted section"
        );
        blobs.push(SectionBlob {
            name: section.name.clone(),
            load_address: section.load_address,
            path,
        });
    }
    info!(count = blobs.len(), dir = %dir.display(), "extracted sections");
    Ok(blobs)
}

/// Best-effort removal of section files after a failed extraction.
fn discard<'a>(paths: impl IntoIterator<Item = &'a Path>) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "removed partial section file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, path = %path.display(), "failed to remove section file"),
        }
    }
}
