//! The driver: selects a mode, runs it to completion, and reports.
//!
//! Generalized from the teacher's `main.rs` (parse CLI, build state, run
//! to completion, print stats) to a mode-selected dispatch over the FS
//! read-execute loop and the two Pipeline Engine variants, all sharing
//! one [`Machine`].

use clap::ValueEnum;

use crate::common::SimError;
use crate::config::Config;
use crate::core::arch::Machine;
use crate::core::executor;
use crate::core::pipeline::Pipeline;
use crate::isa;
use crate::stats::Timing;
use crate::trace::Trace;

/// Simulation mode: functional-only, or one of the two pipeline timing
/// variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Functional-only: no pipeline timing, a direct read-execute loop.
    Fs,
    /// Pipelined, no operand forwarding.
    Nf,
    /// Pipelined, with operand forwarding and load-use stall.
    Wf,
}

/// The outcome of a run: the final (possibly partial) machine state,
/// timing counters when the mode was pipelined, and the fatal error that
/// ended the run early, if any. Divergence and strict-mode violations
/// still carry a fully-formed partial state worth reporting; only a run
/// that completes without issue leaves `error` as `None`.
pub struct RunResult {
    pub machine: Machine,
    pub timing: Option<Timing>,
    pub error: Option<SimError>,
}

/// Loads `image` into a fresh [`Machine`] and runs it in `mode` to
/// completion or until the configured divergence cap is hit. Always
/// returns a [`RunResult`]; check its `error` field for a fatal
/// mid-simulation condition rather than treating a non-`None` error as
/// the absence of machine state to report.
pub fn run(image: &[u32], mode: Mode, config: &Config, trace: &dyn Trace) -> RunResult {
    let mut machine = Machine::new();
    machine.load_image(image);

    match mode {
        Mode::Fs => {
            let error = run_fs(&mut machine, config, trace).err();
            RunResult { machine, timing: None, error }
        }
        Mode::Nf => {
            let (timing, error) = match run_pipelined(&mut machine, false, config, trace) {
                Ok(t) => (Some(t), None),
                Err((t, e)) => (Some(t), Some(e)),
            };
            RunResult { machine, timing, error }
        }
        Mode::Wf => {
            let (timing, error) = match run_pipelined(&mut machine, true, config, trace) {
                Ok(t) => (Some(t), None),
                Err((t, e)) => (Some(t), Some(e)),
            };
            RunResult { machine, timing, error }
        }
    }
}

fn run_fs(machine: &mut Machine, config: &Config, trace: &dyn Trace) -> Result<(), SimError> {
    let mut cycles: u64 = 0;
    loop {
        if machine.halted {
            return Ok(());
        }
        if cycles >= config.divergence_cap {
            return Err(SimError::Divergence(config.divergence_cap));
        }
        let addr = machine.pc as usize;
        if addr >= machine.mem.words().len() * 4 {
            return Ok(());
        }
        let word = machine.mem.read_word(addr / 4);
        let (instr, decode_fault) = isa::decode_checked(word);
        if let Some(fault) = decode_fault {
            trace.diagnostic(&format!("{} at pc {:#010x}", fault, addr));
        }
        if let Err(fault) = executor::commit(machine, &instr) {
            trace.diagnostic(&format!("{} at pc {:#010x}", fault, addr));
            if config.strict {
                return Err(SimError::StrictViolation(format!("{} at pc {:#010x}", fault, addr)));
            }
        }
        cycles += 1;
    }
}

/// Runs the pipeline to completion. On a fatal mid-run condition the
/// timing counters accumulated so far are returned alongside the error,
/// so the caller can still report partial state.
fn run_pipelined(
    machine: &mut Machine,
    forwarding: bool,
    config: &Config,
    trace: &dyn Trace,
) -> Result<Timing, (Timing, SimError)> {
    let mut pipeline = Pipeline::new(forwarding, config.strict);
    loop {
        pipeline.tick(machine, trace);
        if let Some(detail) = pipeline.strict_fault.take() {
            return Err((pipeline.timing, SimError::StrictViolation(detail)));
        }
        if pipeline.is_drained() {
            return Ok(pipeline.timing);
        }
        if pipeline.timing.cycles >= config.divergence_cap {
            return Err((pipeline.timing, SimError::Divergence(config.divergence_cap)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::encode;
    use crate::trace::NullTrace;

    fn halt_only() -> Vec<u32> {
        vec![encode(isa::Instruction::Halt)]
    }

    #[test]
    fn fs_mode_halts_with_no_timing() {
        let config = Config::default();
        let result = run(&halt_only(), Mode::Fs, &config, &NullTrace);
        assert!(result.error.is_none());
        assert!(result.timing.is_none());
        assert!(result.machine.halted);
    }

    #[test]
    fn pipelined_modes_populate_timing() {
        let config = Config::default();
        for mode in [Mode::Nf, Mode::Wf] {
            let result = run(&halt_only(), mode, &config, &NullTrace);
            assert!(result.error.is_none());
            assert!(result.timing.is_some());
            assert!(result.machine.halted);
        }
    }

    #[test]
    fn unknown_opcode_is_skipped_with_a_diagnostic_in_every_mode() {
        // Opcode field 0x3F matches nothing in the defined set.
        let bad_word = 0x3F << 26;
        let image = vec![bad_word, encode(isa::Instruction::Halt)];
        let config = Config::default();
        for mode in [Mode::Fs, Mode::Nf, Mode::Wf] {
            let result = run(&image, mode, &config, &NullTrace);
            assert!(result.error.is_none());
            assert!(result.machine.halted);
        }
    }

    #[test]
    fn divergence_reports_partial_state() {
        let config = Config {
            divergence_cap: 2,
            strict: false,
        };
        // An infinite loop: JR R0 jumps to address 0 forever.
        let image = vec![encode(isa::Instruction::Jr { rs: 0 })];
        for mode in [Mode::Fs, Mode::Nf, Mode::Wf] {
            let result = run(&image, mode, &config, &NullTrace);
            assert!(matches!(result.error, Some(SimError::Divergence(_))));
            assert!(!result.machine.halted);
        }
    }
}
