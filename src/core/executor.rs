//! The Functional Executor: the sole mutator of architectural state.
//!
//! Used directly by the FS read-execute loop and invoked at the WB stage
//! of either pipelined mode. A single entry point, [`commit`], executes
//! one decoded instruction against a [`Machine`] and reports non-fatal
//! diagnostics through a `Result` the caller logs and discards (or, in
//! strict mode, promotes to a fatal run).

use crate::common::ExecFault;
use crate::core::arch::Machine;
use crate::isa::Instruction;

/// Executes one decoded instruction against architectural state.
///
/// Arithmetic and logical ops wrap on 32-bit two's-complement overflow.
/// Branch and jump ops set `pc` directly and return before the default
/// `pc += 4` below; every other opcode falls through to it, including
/// HALT.
pub fn commit(machine: &mut Machine, instr: &Instruction) -> Result<(), ExecFault> {
    match *instr {
        Instruction::Add { rd, rs, rt } => {
            let v = machine.gpr.read(rs).wrapping_add(machine.gpr.read(rt));
            machine.gpr.write(rd, v);
            machine.counters.record_arithmetic();
        }
        Instruction::Sub { rd, rs, rt } => {
            let v = machine.gpr.read(rs).wrapping_sub(machine.gpr.read(rt));
            machine.gpr.write(rd, v);
            machine.counters.record_arithmetic();
        }
        Instruction::Mul { rd, rs, rt } => {
            let v = machine.gpr.read(rs).wrapping_mul(machine.gpr.read(rt));
            machine.gpr.write(rd, v);
            machine.counters.record_arithmetic();
        }
        Instruction::AddI { rt, rs, imm } => {
            let v = machine.gpr.read(rs).wrapping_add(imm);
            machine.gpr.write(rt, v);
            machine.counters.record_arithmetic();
        }
        Instruction::SubI { rt, rs, imm } => {
            let v = machine.gpr.read(rs).wrapping_sub(imm);
            machine.gpr.write(rt, v);
            machine.counters.record_arithmetic();
        }
        Instruction::MulI { rt, rs, imm } => {
            let v = machine.gpr.read(rs).wrapping_mul(imm);
            machine.gpr.write(rt, v);
            machine.counters.record_arithmetic();
        }

        Instruction::Or { rd, rs, rt } => {
            let v = machine.gpr.read(rs) | machine.gpr.read(rt);
            machine.gpr.write(rd, v);
            machine.counters.record_logical();
        }
        Instruction::And { rd, rs, rt } => {
            let v = machine.gpr.read(rs) & machine.gpr.read(rt);
            machine.gpr.write(rd, v);
            machine.counters.record_logical();
        }
        Instruction::Xor { rd, rs, rt } => {
            let v = machine.gpr.read(rs) ^ machine.gpr.read(rt);
            machine.gpr.write(rd, v);
            machine.counters.record_logical();
        }
        Instruction::OrI { rt, rs, imm } => {
            let v = machine.gpr.read(rs) | imm;
            machine.gpr.write(rt, v);
            machine.counters.record_logical();
        }
        Instruction::AndI { rt, rs, imm } => {
            let v = machine.gpr.read(rs) & imm;
            machine.gpr.write(rt, v);
            machine.counters.record_logical();
        }
        Instruction::XorI { rt, rs, imm } => {
            let v = machine.gpr.read(rs) ^ imm;
            machine.gpr.write(rt, v);
            machine.counters.record_logical();
        }

        Instruction::Ldw { rt, rs, imm } => {
            let addr = machine.gpr.read(rs).wrapping_add(imm);
            machine.counters.record_memory_access();
            match crate::core::arch::Memory::check_address(addr) {
                Ok(idx) => {
                    let v = machine.mem.read_word(idx) as i32;
                    machine.gpr.write(rt, v);
                }
                Err(fault) => {
                    machine.pc = machine.pc.wrapping_add(4);
                    return Err(fault);
                }
            }
        }
        Instruction::Stw { rt, rs, imm } => {
            let addr = machine.gpr.read(rs).wrapping_add(imm);
            machine.counters.record_memory_access();
            match crate::core::arch::Memory::check_address(addr) {
                Ok(idx) => {
                    let v = machine.gpr.read(rt) as u32;
                    machine.mem.write_word(idx, v);
                }
                Err(fault) => {
                    machine.pc = machine.pc.wrapping_add(4);
                    return Err(fault);
                }
            }
        }

        Instruction::Bz { rs, imm } => {
            machine.counters.record_control_transfer();
            if machine.gpr.read(rs) == 0 {
                machine.pc = (machine.pc as i32).wrapping_add(imm.wrapping_mul(4)) as u32;
                return Ok(());
            }
        }
        Instruction::Beq { rs, rt, imm } => {
            machine.counters.record_control_transfer();
            if machine.gpr.read(rs) == machine.gpr.read(rt) {
                machine.pc = (machine.pc as i32).wrapping_add(imm.wrapping_mul(4)) as u32;
                return Ok(());
            }
        }
        Instruction::Jr { rs } => {
            machine.counters.record_control_transfer();
            machine.pc = machine.gpr.read(rs) as u32;
            return Ok(());
        }
        Instruction::Halt => {
            machine.counters.record_control_transfer();
            machine.halted = true;
        }

        // Only reachable from the FS loop: a pipeline bubble never reaches
        // `commit` (retire skips invalid/NOP latches before calling it).
        // Falls through to the default `pc += 4` below so a substituted
        // unknown opcode doesn't stall the read-execute loop in place.
        Instruction::Nop => {}
    }

    machine.pc = machine.pc.wrapping_add(4);
    Ok(())
}
