//! Architectural state: register file, word memory, and the bundled
//! `Machine` value that owns both.

/// General-purpose register file (R0-R31, R0 hardwired to zero).
pub mod gpr;

/// Word-addressable data memory with per-word modification tracking.
pub mod memory;

/// The bundled architectural state threaded through the executor and
/// pipeline.
pub mod machine;

pub use gpr::Gpr;
pub use machine::Machine;
pub use memory::Memory;
