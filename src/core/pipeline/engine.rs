//! The Pipeline Engine: a 5-stage in-order latch array shared by the
//! no-forwarding and with-forwarding timing variants. One cycle is
//! evaluated in five fixed phases, each phase consuming the *previous*
//! cycle's latch contents, except the forwarding paths which read the
//! current cycle's MEM/WB outputs. This reverse-order technique lets a
//! single cycle's sequential mutation stand in for five stages that
//! conceptually act in parallel on five different instructions.

use crate::core::arch::Machine;
use crate::core::pipeline::forwarding;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExLatch, IdLatch, IfLatch, MemLatch, WbLatch};
use crate::core::pipeline::stages;
use crate::stats::Timing;
use crate::trace::Trace;

/// The 5-stage pipeline's mutable state: one latch per stage, the fetch
/// PC (independent of architectural PC), and this run's timing counters.
pub struct Pipeline {
    pub if_latch: IfLatch,
    pub id: IdLatch,
    pub ex: ExLatch,
    pub mem: MemLatch,
    pub wb: WbLatch,
    pub fetch_pc: u32,
    pub halt_fetched: bool,
    pub forwarding: bool,
    pub strict: bool,
    pub strict_fault: Option<String>,
    pub timing: Timing,
}

impl Pipeline {
    /// Builds a pipeline with all latches empty. `forwarding` selects
    /// the with-forwarding variant; `false` is no-forwarding. `strict`
    /// promotes a non-fatal diagnostic at retirement into a recorded
    /// fault the driver loop treats as fatal.
    pub fn new(forwarding: bool, strict: bool) -> Self {
        Self {
            if_latch: IfLatch::default(),
            id: IdLatch::default(),
            ex: ExLatch::default(),
            mem: MemLatch::default(),
            wb: WbLatch::default(),
            fetch_pc: 0,
            halt_fetched: false,
            forwarding,
            strict,
            strict_fault: None,
            timing: Timing::default(),
        }
    }

    /// True once every latch holds a bubble and fetching has stopped;
    /// the driver loop terminates when this holds.
    pub fn is_drained(&self) -> bool {
        !self.if_latch.valid && !self.id.valid && !self.ex.valid && !self.mem.valid && !self.wb.valid
    }

    /// Runs one cycle: retire, resolve memory, execute, hazard-detect,
    /// then advance and fetch.
    pub fn tick(&mut self, machine: &mut Machine, trace: &dyn Trace) {
        self.timing.cycles += 1;

        stages::writeback::retire(self, machine, trace);
        stages::memory::resolve(self, machine);
        stages::execute::execute(self, machine);

        let stall = if self.forwarding {
            forwarding::need_load_use_stall(&self.id, &self.ex)
        } else {
            hazards::need_stall(&self.id, &self.ex, &self.mem)
        };

        let flush_target = if self.ex.valid && self.ex.branch_taken {
            Some(self.ex.branch_target)
        } else {
            None
        };

        stages::fetch::advance_and_fetch(self, machine, stall, flush_target, trace);

        trace.cycle(self.timing.cycles, &self.stage_summary());
    }

    /// A one-line snapshot of every latch, for `--debug`'s per-cycle
    /// trace. Invalid (bubble) latches print as `-`.
    fn stage_summary(&self) -> String {
        fn slot(valid: bool, pc: u32, instr: &crate::isa::Instruction) -> String {
            if valid {
                format!("{:#06x}:{:?}", pc, instr)
            } else {
                "-".to_string()
            }
        }
        format!(
            "IF={} ID={} EX={} MEM={} WB={}",
            if self.if_latch.valid {
                format!("{:#06x}", self.if_latch.pc)
            } else {
                "-".to_string()
            },
            slot(self.id.valid, self.id.pc, &self.id.instr),
            slot(self.ex.valid, self.ex.pc, &self.ex.instr),
            slot(self.mem.valid, self.mem.pc, &self.mem.instr),
            slot(self.wb.valid, self.wb.pc, &self.wb.instr),
        )
    }
}
