//! Fatal errors and non-fatal execution diagnostics.
//!
//! This module separates two error taxonomies used throughout the
//! simulator: [`SimError`] for conditions that abort the run before or
//! during simulation, and [`ExecFault`] for conditions the Functional
//! Executor reports but does not treat as fatal in normal mode (see
//! execution fault handling in `core::executor`).

use std::fmt;

/// Fatal simulator errors.
///
/// Raised when the simulator cannot proceed at all: a bad image file, or
/// a run that never reaches HALT within the configured cycle cap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The image file could not be opened or read.
    ImageUnreadable(String),

    /// The image file contains more than [`crate::common::MAX_IMAGE_WORDS`]
    /// words.
    ImageTooLarge(usize),

    /// A line of the image file is not a valid hexadecimal word.
    ///
    /// Carries the 1-based line number and the offending text.
    ImageMalformed(usize, String),

    /// The cycle count exceeded the configured divergence cap without the
    /// program reaching HALT.
    Divergence(u64),

    /// A non-fatal diagnostic was promoted to fatal by strict mode.
    StrictViolation(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ImageUnreadable(path) => write!(f, "cannot read image file '{}'", path),
            SimError::ImageTooLarge(n) => {
                write!(f, "image has {} words, exceeds 1024-word memory", n)
            }
            SimError::ImageMalformed(line, text) => {
                write!(f, "image line {} is not a valid hex word: '{}'", line, text)
            }
            SimError::Divergence(cap) => {
                write!(f, "exceeded divergence cap of {} cycles without halting", cap)
            }
            SimError::StrictViolation(detail) => {
                write!(f, "strict mode: {}", detail)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Non-fatal diagnostics raised by the Functional Executor.
///
/// In normal mode these are logged and counted; the instruction retires
/// with reads suppressed to zero or writes suppressed, and simulation
/// continues. In strict mode (see [`crate::config::Config`]) the driver
/// promotes these to a fatal run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecFault {
    /// A word did not decode to any opcode in the instruction set.
    UnknownOpcode(u32),

    /// An LDW/STW effective address was not a multiple of 4.
    UnalignedAccess(i32),

    /// An LDW/STW effective address fell outside `[0, 4096)`.
    OutOfBounds(i32),
}

impl fmt::Display for ExecFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecFault::UnknownOpcode(word) => write!(f, "unknown opcode in word {:#010x}", word),
            ExecFault::UnalignedAccess(addr) => write!(f, "unaligned access at {:#x}", addr),
            ExecFault::OutOfBounds(addr) => write!(f, "out-of-bounds access at {:#x}", addr),
        }
    }
}

impl std::error::Error for ExecFault {}
