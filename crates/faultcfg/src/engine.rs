//! Engine command line: parsing it back and launching the engine.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use faultcfg_elf::MemoryRegion;
use faultcfg_elf::hex::parse_hex;
use tracing::info;

use crate::isa::IsaVariant;
use crate::symbols::{HaltAddress, IgnoreRange};
use crate::{Error, Result};

/// Engine command line as the engine itself reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineArgs {
    pub start: u64,
    pub halts: Vec<HaltAddress>,
    /// Extra symbol names for reporting (`--symbol`).
    pub symbols: Vec<(String, u64)>,
    pub sections: Vec<(PathBuf, u64)>,
    pub flash: MemoryRegion,
    pub ram: MemoryRegion,
    pub ignores: Vec<IgnoreRange>,
    /// Emulation timeout in clock cycles, 0 when unset.
    pub timeout: u64,
    pub isa: IsaVariant,
}

impl EngineArgs {
    /// Parse an argument list.
    ///
    /// Numbers with a `0x` prefix are hex, others decimal. Options may
    /// repeat; the ISA defaults to ARMv7-M. Start, at least one
    /// halt, and non-empty flash and RAM are required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] for unknown options, missing or
    /// malformed operands, and missing required options.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut tokens = args.iter().map(AsRef::as_ref);
        let mut start = None;
        let mut halts = Vec::new();
        let mut symbols = Vec::new();
        let mut sections = Vec::new();
        let mut flash = MemoryRegion {
            origin: 0,
            length: 0,
        };
        let mut ram = flash;
        let mut ignores = Vec::new();
        let mut timeout = 0;
        let mut isa = IsaVariant::ArmV7M;

        while let Some(option) = tokens.next() {
            let mut operand = || {
                tokens
                    .next()
                    .ok_or_else(|| invalid(format!("missing operand for '{option}'")))
            };
            match option {
                "--start" => start = Some(number(operand()?)?),
                "--halt" => {
                    let label = operand()?.to_string();
                    let address = number(operand()?)?;
                    halts.push(HaltAddress { label, address });
                }
                "--symbol" => {
                    let name = operand()?.to_string();
                    symbols.push((name, number(operand()?)?));
                }
                "--section" => {
                    let path = PathBuf::from(operand()?);
                    sections.push((path, number(operand()?)?));
                }
                "--flash" => {
                    flash.origin = number(operand()?)?;
                    flash.length = number(operand()?)?;
                }
                "--ram" => {
                    ram.origin = number(operand()?)?;
                    ram.length = number(operand()?)?;
                }
                "--ignore" => {
                    let begin = number(operand()?)?;
                    let end = number(operand()?)?;
                    let range = IgnoreRange::new(begin, end).ok_or_else(|| {
                        invalid(format!("empty ignore range {begin:#x}..{end:#x}"))
                    })?;
                    ignores.push(range);
                }
                "--timeout" => timeout = number(operand()?)?,
                "--armv6m" => isa = IsaVariant::ArmV6M,
                "--armv7m" => isa = IsaVariant::ArmV7M,
                other => return Err(invalid(format!("unknown option '{other}'"))),
            }
        }

        let start = start.ok_or_else(|| invalid("no entry point given"))?;
        if halts.is_empty() {
            return Err(invalid("no end address given"));
        }
        if ram.length == 0 {
            return Err(invalid("no RAM given"));
        }
        if flash.length == 0 {
            return Err(invalid("no FLASH given"));
        }

        Ok(Self {
            start,
            halts,
            symbols,
            sections,
            flash,
            ram,
            ignores,
            timeout,
            isa,
        })
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidArguments(message.into())
}

/// `0x`-prefixed numbers are hex, anything else decimal.
fn number(token: &str) -> Result<u64> {
    let value = if token.starts_with("0x") {
        parse_hex(token)
    } else {
        token.parse().ok()
    };
    value.ok_or_else(|| invalid(format!("invalid number '{token}'")))
}

/// Run the engine with `args`, inheriting stdio, and wait for it to exit.
///
/// # Errors
///
/// Returns [`Error::EngineLaunch`] if the engine cannot be started.
pub fn launch(engine: &Path, args: &[String]) -> Result<ExitStatus> {
    info!(engine = %engine.display(), args = args.len(), "launching engine");
    Command::new(engine)
        .args(args)
        .status()
        .map_err(|source| Error::EngineLaunch {
            path: engine.display().to_string(),
            source,
        })
}
