use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to get a ROM into memory. Fatal to startup.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("unable to open ROM {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to read ROM: {0}")]
    Read(#[from] io::Error),
}

/// A condition an instruction absorbed instead of executing.
///
/// Faults never halt the machine: the offending instruction is skipped and the
/// program counter moves on to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),
    #[error("call to {target:#05X} dropped, stack is full")]
    StackOverflow { target: u16 },
    #[error("return dropped, stack is empty")]
    StackUnderflow,
}
