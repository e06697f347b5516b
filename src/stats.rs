//! Final-state and timing statistics reporting.
//!
//! Two independent counter groups mirror the split in the data model:
//! [`Counters`] belongs to architectural state (instruction-class counts,
//! incremented once per retirement), while [`Timing`] belongs to the
//! Pipeline Engine (cycles, stalls, flushes) and stays zeroed in FS mode.

/// Instruction-class counters, owned by architectural state.
///
/// Incremented exactly once per architectural retirement; NOP and
/// squashed/bubble instructions never touch these.
#[derive(Default, Clone, Copy, Debug)]
pub struct Counters {
    pub total: u64,
    pub arithmetic: u64,
    pub logical: u64,
    pub memory_access: u64,
    pub control_transfer: u64,
}

impl Counters {
    pub fn record_arithmetic(&mut self) {
        self.total += 1;
        self.arithmetic += 1;
    }

    pub fn record_logical(&mut self) {
        self.total += 1;
        self.logical += 1;
    }

    pub fn record_memory_access(&mut self) {
        self.total += 1;
        self.memory_access += 1;
    }

    pub fn record_control_transfer(&mut self) {
        self.total += 1;
        self.control_transfer += 1;
    }
}

/// Pipeline cycle/stall/flush counters, owned by the Pipeline Engine.
///
/// Unused (stays all-zero) in FS mode, which has no notion of a cycle.
#[derive(Default, Clone, Copy, Debug)]
pub struct Timing {
    pub cycles: u64,
    pub stalls: u64,
    pub flushes: u64,
}

/// Prints the final-state textual surface: instruction counters, the
/// written/non-zero register file, modified memory words, and (when
/// `timing` is present) cycle/stall/flush totals.
pub fn print_final_state(
    counters: &Counters,
    regs: &[i32],
    reg_written: &[bool],
    pc: u32,
    mem: &[u32],
    mem_changed: &[bool],
    timing: Option<&Timing>,
) {
    println!("==========================================================");
    println!("FINAL STATE");
    println!("==========================================================");
    println!("instructions.total            {}", counters.total);
    println!("instructions.arithmetic       {}", counters.arithmetic);
    println!("instructions.logical          {}", counters.logical);
    println!("instructions.memory_access    {}", counters.memory_access);
    println!(
        "instructions.control_transfer {}",
        counters.control_transfer
    );
    println!("----------------------------------------------------------");
    println!("pc                            {:#010x}", pc);
    for (i, (&val, &written)) in regs.iter().zip(reg_written.iter()).enumerate() {
        if written || val != 0 {
            println!("R{:<29}{}", i, val);
        }
    }
    println!("----------------------------------------------------------");
    for (i, (&word, &changed)) in mem.iter().zip(mem_changed.iter()).enumerate() {
        if changed {
            println!("mem[{:#06x}]                   {:#010x}", i * 4, word);
        }
    }
    if let Some(t) = timing {
        println!("----------------------------------------------------------");
        println!("cycles                         {}", t.cycles);
        println!("stalls                         {}", t.stalls);
        println!("flushes                        {}", t.flushes);
    }
    println!("==========================================================");
}
