//! Raw section extraction.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::Result;
use crate::constants::OBJCOPY;
use crate::tool::{Toolchain, run_tool};

/// Materializes one named section of the binary as a raw byte file.
pub trait SectionExtractor {
    /// Write the bytes of `section` to `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the section cannot be extracted.
    fn extract(&self, section: &str, dest: &Path) -> Result<()>;
}

/// Extraction through `objcopy -O binary --only-section=<name>`.
#[derive(Clone, Debug)]
pub struct Objcopy {
    toolchain: Toolchain,
    elf: PathBuf,
}

impl Objcopy {
    #[must_use]
    pub fn new(toolchain: Toolchain, elf: &Path) -> Self {
        Self {
            toolchain,
            elf: elf.to_path_buf(),
        }
    }
}

impl SectionExtractor for Objcopy {
    fn extract(&self, section: &str, dest: &Path) -> Result<()> {
        let mut cmd = Command::new(self.toolchain.tool(OBJCOPY));
        cmd.arg("-O")
            .arg("binary")
            .arg(format!("--only-section={section}"))
            .arg(&self.elf)
            .arg(dest);
        run_tool(&mut cmd).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataError;

    #[test]
    fn test_objcopy_missing_toolchain() {
        let dir = tempfile::tempdir().unwrap();
        let objcopy = Objcopy::new(Toolchain::new("faultcfg-missing-"), Path::new("a.elf"));
        let result = objcopy.extract(".text", &dir.path().join("code_section.text"));
        assert!(matches!(result, Err(MetadataError::Spawn { .. })));
    }
}
