//! Resolve-memory phase: reads the loaded word for an LDW in MEM so it
//! is available as a forwarding source. Never mutates memory: the store
//! half of an STW and all register/PC effects are the Functional
//! Executor's job alone, applied when the instruction reaches WB.

use crate::core::arch::Machine;
use crate::core::pipeline::engine::Pipeline;
use crate::isa::Instruction;

pub fn resolve(pipeline: &mut Pipeline, machine: &Machine) {
    if !pipeline.mem.valid {
        return;
    }
    if let Instruction::Ldw { .. } = pipeline.mem.instr {
        pipeline.mem.load_value = match crate::core::arch::Memory::check_address(pipeline.mem.result) {
            Ok(idx) => machine.mem.read_word(idx) as i32,
            Err(_) => 0,
        };
    }
}
