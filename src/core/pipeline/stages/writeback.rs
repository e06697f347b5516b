//! Retire phase: invokes the Functional Executor on the instruction
//! currently in WB. The only phase that mutates architectural state.

use crate::core::arch::Machine;
use crate::core::executor;
use crate::core::pipeline::engine::Pipeline;
use crate::trace::Trace;

pub fn retire(pipeline: &mut Pipeline, machine: &mut Machine, trace: &dyn Trace) {
    if !pipeline.wb.valid || pipeline.wb.instr.is_nop() {
        return;
    }
    machine.pc = pipeline.wb.pc;
    if let Err(fault) = executor::commit(machine, &pipeline.wb.instr) {
        let message = format!("{} at pc {:#010x}", fault, pipeline.wb.pc);
        trace.diagnostic(&message);
        if pipeline.strict {
            pipeline.strict_fault.get_or_insert(message);
        }
    }
}
