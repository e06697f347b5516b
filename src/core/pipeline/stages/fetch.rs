//! Advance-and-fetch phase: shifts every latch one stage forward,
//! decodes a fetched word into ID, and fetches the next word into IF.
//!
//! Decoding happens here rather than in its own phase: the data model
//! has no standalone decode latch, so a word becomes a classified
//! instruction exactly when it moves from IF into ID.

use crate::core::arch::Machine;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::{ExLatch, IdLatch, IfLatch, MemLatch, WbLatch};
use crate::isa;
use crate::trace::Trace;

fn fetch_one(pipeline: &mut Pipeline, machine: &Machine) {
    if pipeline.halt_fetched {
        pipeline.if_latch = IfLatch::default();
        return;
    }
    let byte_addr = pipeline.fetch_pc as usize;
    if byte_addr >= machine.mem.words().len() * 4 {
        pipeline.halt_fetched = true;
        pipeline.if_latch = IfLatch::default();
        return;
    }
    let word = machine.mem.read_word(byte_addr / 4);
    pipeline.if_latch = IfLatch {
        valid: true,
        pc: pipeline.fetch_pc,
        word,
    };
    pipeline.fetch_pc = pipeline.fetch_pc.wrapping_add(4);
}

fn decode_into_id(pipeline: &mut Pipeline, trace: &dyn Trace) {
    if !pipeline.if_latch.valid {
        pipeline.id = IdLatch::default();
        return;
    }
    let word = pipeline.if_latch.word;
    let (instr, fault) = isa::decode_checked(word);
    if let Some(fault) = fault {
        trace.diagnostic(&format!("{} at pc {:#010x}", fault, pipeline.if_latch.pc));
    }
    if matches!(instr, isa::Instruction::Halt) {
        pipeline.halt_fetched = true;
    }
    pipeline.id = IdLatch {
        valid: true,
        pc: pipeline.if_latch.pc,
        instr,
    };
}

/// Shifts WB<-MEM<-EX<-ID<-IF and fetches a new word, honoring a stall
/// (freeze IF/ID, bubble into EX) or a branch flush (bubble IF/ID,
/// redirect `fetch_pc`). Flush takes priority over stall: the
/// instruction that requested the stall is discarded by the flush
/// regardless.
pub fn advance_and_fetch(
    pipeline: &mut Pipeline,
    machine: &Machine,
    stall: bool,
    flush_target: Option<u32>,
    trace: &dyn Trace,
) {
    pipeline.wb = WbLatch {
        valid: pipeline.mem.valid,
        pc: pipeline.mem.pc,
        instr: pipeline.mem.instr,
        result: pipeline.mem.result,
        load_value: pipeline.mem.load_value,
    };
    pipeline.mem = MemLatch {
        valid: pipeline.ex.valid,
        pc: pipeline.ex.pc,
        instr: pipeline.ex.instr,
        result: pipeline.ex.result,
        load_value: 0,
    };

    if let Some(target) = flush_target {
        pipeline.ex = ExLatch::default();
        pipeline.id = IdLatch::default();
        pipeline.if_latch = IfLatch::default();
        pipeline.fetch_pc = target;
        pipeline.halt_fetched = false;
        pipeline.timing.flushes += 2;
        return;
    }

    if stall {
        pipeline.ex = ExLatch::default();
        pipeline.timing.stalls += 1;
        return;
    }

    pipeline.ex = ExLatch {
        valid: pipeline.id.valid,
        pc: pipeline.id.pc,
        instr: pipeline.id.instr,
        ..ExLatch::default()
    };
    decode_into_id(pipeline, trace);
    fetch_one(pipeline, machine);
}
