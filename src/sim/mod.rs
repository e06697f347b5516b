//! Simulation harness: image loading and the mode-selected driver.

/// Runs a loaded image in FS, NF, or WF mode to completion.
pub mod driver;

/// Parses the hex-per-line memory image format.
pub mod loader;

pub use driver::{run, Mode, RunResult};
