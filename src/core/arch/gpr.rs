//! General-purpose register file.
//!
//! Thirty-two signed 32-bit registers. Register R0 is hardwired to zero:
//! reads always return 0 and writes are silently suppressed, regardless
//! of the value requested.

use crate::common::NUM_REGS;

/// General-purpose register file with R0-is-zero enforcement and
/// per-register first-write tracking for the final-state reporter.
pub struct Gpr {
    regs: [i32; NUM_REGS],
    written: [bool; NUM_REGS],
}

impl Gpr {
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
            written: [false; NUM_REGS],
        }
    }

    /// Reads a register. R0 always reads as 0.
    pub fn read(&self, idx: u8) -> i32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx as usize]
        }
    }

    /// Writes a register. Writes to R0 are silently suppressed and do
    /// not set the written flag.
    pub fn write(&mut self, idx: u8, val: i32) {
        if idx != 0 {
            self.regs[idx as usize] = val;
            self.written[idx as usize] = true;
        }
    }

    pub fn values(&self) -> &[i32; NUM_REGS] {
        &self.regs
    }

    pub fn written(&self) -> &[bool; NUM_REGS] {
        &self.written
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r0_write_is_suppressed() {
        let mut gpr = Gpr::new();
        gpr.write(0, 42);
        assert_eq!(gpr.read(0), 0);
        assert!(!gpr.written()[0]);
    }

    #[test]
    fn write_then_read() {
        let mut gpr = Gpr::new();
        gpr.write(5, -7);
        assert_eq!(gpr.read(5), -7);
        assert!(gpr.written()[5]);
    }
}
