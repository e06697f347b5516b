//! Architectural state: the register file, memory, program counter, and
//! instruction-class counters, bundled into one value threaded explicitly
//! to the executor and pipeline rather than scattered as statics.

use crate::core::arch::{Gpr, Memory};
use crate::stats::Counters;

/// The simulator's architectural state. Created once per run and mutated
/// only by the Functional Executor's commit entry point.
pub struct Machine {
    pub pc: u32,
    pub gpr: Gpr,
    pub mem: Memory,
    pub counters: Counters,
    pub halted: bool,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            pc: 0,
            gpr: Gpr::new(),
            mem: Memory::new(),
            counters: Counters::default(),
            halted: false,
        }
    }

    pub fn load_image(&mut self, image: &[u32]) {
        self.mem.load_image(image);
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
