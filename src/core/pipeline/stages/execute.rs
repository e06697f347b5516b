//! Execute phase: computes the ALU/address result, the value to store,
//! and branch/jump disposition for the instruction currently in EX.
//!
//! In the with-forwarding variant, operands are resolved through
//! [`forwarding::resolve_operands`] (MEM-over-WB priority); in the
//! no-forwarding variant, the no-forwarding hazard rule guarantees any
//! producer has already retired to the register file by the time its
//! consumer reaches EX, so operands are read directly.

use crate::core::arch::Machine;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::forwarding;
use crate::core::pipeline::latches::{MemLatch, WbLatch};
use crate::isa::Instruction;

fn operands(pipeline: &Pipeline, machine: &Machine) -> (i32, i32) {
    if pipeline.forwarding {
        forwarding::resolve_operands(&pipeline.ex.instr, &machine.gpr, &pipeline.mem, &pipeline.wb)
    } else {
        let unused_mem = MemLatch::default();
        let unused_wb = WbLatch::default();
        forwarding::resolve_operands(&pipeline.ex.instr, &machine.gpr, &unused_mem, &unused_wb)
    }
}

pub fn execute(pipeline: &mut Pipeline, machine: &Machine) {
    if !pipeline.ex.valid {
        return;
    }
    let (a, b) = operands(pipeline, machine);
    let pc = pipeline.ex.pc;

    match pipeline.ex.instr {
        Instruction::Add { .. } => pipeline.ex.result = a.wrapping_add(b),
        Instruction::Sub { .. } => pipeline.ex.result = a.wrapping_sub(b),
        Instruction::Mul { .. } => pipeline.ex.result = a.wrapping_mul(b),
        Instruction::Or { .. } => pipeline.ex.result = a | b,
        Instruction::And { .. } => pipeline.ex.result = a & b,
        Instruction::Xor { .. } => pipeline.ex.result = a ^ b,

        Instruction::AddI { imm, .. } => pipeline.ex.result = a.wrapping_add(imm),
        Instruction::SubI { imm, .. } => pipeline.ex.result = a.wrapping_sub(imm),
        Instruction::MulI { imm, .. } => pipeline.ex.result = a.wrapping_mul(imm),
        Instruction::OrI { imm, .. } => pipeline.ex.result = a | imm,
        Instruction::AndI { imm, .. } => pipeline.ex.result = a & imm,
        Instruction::XorI { imm, .. } => pipeline.ex.result = a ^ imm,

        Instruction::Ldw { imm, .. } => pipeline.ex.result = a.wrapping_add(imm),
        Instruction::Stw { imm, .. } => {
            pipeline.ex.result = a.wrapping_add(imm);
            pipeline.ex.store_value = b;
        }

        Instruction::Bz { imm, .. } => {
            pipeline.ex.branch_taken = a == 0;
            pipeline.ex.branch_target = (pc as i32).wrapping_add(imm.wrapping_mul(4)) as u32;
        }
        Instruction::Beq { imm, .. } => {
            pipeline.ex.branch_taken = a == b;
            pipeline.ex.branch_target = (pc as i32).wrapping_add(imm.wrapping_mul(4)) as u32;
        }
        Instruction::Jr { .. } => {
            pipeline.ex.branch_taken = true;
            pipeline.ex.branch_target = a as u32;
        }

        Instruction::Halt | Instruction::Nop => {}
    }
}
