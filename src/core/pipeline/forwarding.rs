//! With-forwarding operand resolution and the load-use stall rule.
//!
//! Priority order mirrors the corpus's forwarding path: scan the
//! MEM-stage producer first, then the WB-stage producer, and let the
//! later scan win when both match (the newer value). R0 and producers
//! that do not write a register (branches, STW, HALT, NOP) are never
//! forwarding sources.

use crate::core::arch::Gpr;
use crate::core::pipeline::latches::{ExLatch, IdLatch, MemLatch, WbLatch};
use crate::isa::Instruction;

fn forwarding_dest(instr: &Instruction) -> Option<u8> {
    instr.dest().filter(|&r| r != 0)
}

/// Resolves one operand: forwarded value if a producer matches, else the
/// live register file.
fn resolve(source: u8, gpr: &Gpr, mem: &MemLatch, wb: &WbLatch) -> i32 {
    if source == 0 {
        return 0;
    }
    let mut value = gpr.read(source);
    if wb.valid {
        if let Some(dest) = forwarding_dest(&wb.instr) {
            if dest == source {
                value = wb.produced_value();
            }
        }
    }
    if mem.valid {
        if let Some(dest) = forwarding_dest(&mem.instr) {
            if dest == source {
                value = mem.produced_value();
            }
        }
    }
    value
}

/// Resolves both operand slots for the instruction currently in EX,
/// honoring MEM-over-WB forwarding priority.
pub fn resolve_operands(instr: &Instruction, gpr: &Gpr, mem: &MemLatch, wb: &WbLatch) -> (i32, i32) {
    let sources = instr.sources();
    let a = sources[0].map_or(0, |s| resolve(s, gpr, mem, wb));
    let b = sources[1].map_or(0, |s| resolve(s, gpr, mem, wb));
    (a, b)
}

/// True if the instruction in ID must stall one cycle because EX
/// currently holds an LDW whose destination is one of ID's sources.
pub fn need_load_use_stall(id: &IdLatch, ex: &ExLatch) -> bool {
    if !id.valid || !ex.valid {
        return false;
    }
    let dest = match ex.instr {
        Instruction::Ldw { rt, .. } if rt != 0 => rt,
        _ => return false,
    };
    id.instr.sources().iter().flatten().any(|&s| s == dest)
}
