//! The simulator core: architectural state, the Functional Executor, and
//! the Pipeline Engine (no-forwarding and with-forwarding variants).

/// Architectural state: register file, memory, and the bundled `Machine`.
pub mod arch;

/// The Functional Executor: the sole mutator of architectural state.
pub mod executor;

/// The 5-stage in-order Pipeline Engine, in both timing variants.
pub mod pipeline;
