//! Shared types used throughout the simulator: the fatal/non-fatal error
//! taxonomy and a handful of constants describing the fixed-size memory and
//! register file.

/// Fatal simulator errors and non-fatal execution diagnostics.
pub mod error;

pub use error::{ExecFault, SimError};

/// Number of general-purpose registers (R0-R31). R0 is hardwired to zero.
pub const NUM_REGS: usize = 32;

/// Memory size in 32-bit words (4 KiB, word-addressed).
pub const MEM_WORDS: usize = 1024;

/// Maximum number of hex words accepted from an image file.
pub const MAX_IMAGE_WORDS: usize = MEM_WORDS;
