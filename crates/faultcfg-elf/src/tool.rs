//! Invocation of GNU binutils.

use std::fmt;
use std::process::Command;

use tracing::debug;

use crate::constants::DEFAULT_TOOLCHAIN_PREFIX;
use crate::{MetadataError, Result};

/// Cross binutils identified by their command prefix (`arm-none-eabi-`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    prefix: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new(DEFAULT_TOOLCHAIN_PREFIX)
    }
}

impl Toolchain {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full command name of a tool, e.g. `arm-none-eabi-objdump`.
    #[must_use]
    pub fn tool(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// Find an ARM toolchain prefix in PATH.
    ///
    /// Probes common bare-metal ARM prefixes for a working `objdump`.
    #[must_use]
    pub fn find() -> Option<Self> {
        const PREFIXES: &[&str] = &["arm-none-eabi-", "arm-none-elf-", "arm-linux-gnueabi-"];

        PREFIXES
            .iter()
            .map(|prefix| Self::new(prefix))
            .find(|toolchain| {
                Command::new(toolchain.tool(crate::OBJDUMP))
                    .arg("--version")
                    .output()
                    .is_ok_and(|o| o.status.success())
            })
    }
}

/// An external tool that ran and exited unsuccessfully.
///
/// Carries everything the tool printed, unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
    pub command: String,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "`{}` exited with status {code}", self.command),
            None => write!(f, "`{}` was terminated by a signal", self.command),
        }
    }
}

impl std::error::Error for ToolFailure {}

/// Run a command to completion and return its stdout.
pub(crate) fn run_tool(cmd: &mut Command) -> Result<String> {
    let command = describe(cmd);
    debug!(%command, "running");

    let output = cmd.output().map_err(|source| MetadataError::Spawn {
        tool: cmd.get_program().to_string_lossy().into_owned(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        return Err(ToolFailure {
            command,
            code: output.status.code(),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into());
    }

    Ok(stdout)
}

fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
