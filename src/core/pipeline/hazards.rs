//! No-forwarding hazard detection.
//!
//! The weaker of the two timing variants: any register-writing producer
//! currently in EX or MEM stalls a consumer in ID, regardless of which
//! operand slot or how many cycles remain until the value is available.

use crate::core::pipeline::latches::{ExLatch, IdLatch, MemLatch};

fn produces_register(latch_dest: Option<u8>) -> Option<u8> {
    latch_dest.filter(|&r| r != 0)
}

/// True if the instruction in ID must stall this cycle because a
/// register-writing producer in EX or MEM targets one of its sources.
///
/// Only EX and MEM are scanned: WB is assumed already visible via the
/// same-cycle write-half/read-half register file convention.
pub fn need_stall(id: &IdLatch, ex: &ExLatch, mem: &MemLatch) -> bool {
    if !id.valid {
        return false;
    }
    let sources = id.instr.sources();

    let mut producers = Vec::new();
    if ex.valid {
        producers.push(produces_register(ex.instr.dest()));
    }
    if mem.valid {
        producers.push(produces_register(mem.instr.dest()));
    }

    for producer in producers.into_iter().flatten() {
        for source in sources.iter().flatten() {
            if *source == producer {
                return true;
            }
        }
    }
    false
}
