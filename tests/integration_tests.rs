//! End-to-end scenarios run through all three modes, checked against the
//! universal invariant that FS, NF, and WF always agree on final
//! architectural state regardless of timing.

use pipesim::config::Config;
use pipesim::core::arch::Machine;
use pipesim::isa::{encode, Instruction};
use pipesim::sim::{self, Mode};
use pipesim::trace::NullTrace;

fn assemble(instrs: &[Instruction]) -> Vec<u32> {
    instrs.iter().map(|i| encode(*i)).collect()
}

fn run_mode(image: &[u32], mode: Mode) -> Machine {
    let config = Config::default();
    let trace = NullTrace;
    let result = sim::run(image, mode, &config, &trace);
    assert!(result.error.is_none());
    result.machine
}

fn run_mode_strict_is_err(image: &[u32], mode: Mode) -> bool {
    let config = Config {
        strict: true,
        ..Config::default()
    };
    let trace = NullTrace;
    sim::run(image, mode, &config, &trace).error.is_some()
}

/// Asserts the universal invariant that FS, NF, and WF agree on final
/// register file, memory, PC, and instruction-class counters for the
/// same image.
fn assert_modes_agree(image: &[u32]) {
    let fs = run_mode(image, Mode::Fs);
    let nf = run_mode(image, Mode::Nf);
    let wf = run_mode(image, Mode::Wf);

    assert_eq!(fs.gpr.values(), nf.gpr.values());
    assert_eq!(fs.gpr.values(), wf.gpr.values());
    assert_eq!(fs.mem.words(), nf.mem.words());
    assert_eq!(fs.mem.words(), wf.mem.words());
    assert_eq!(fs.pc, nf.pc);
    assert_eq!(fs.pc, wf.pc);
    assert_eq!(fs.counters.total, nf.counters.total);
    assert_eq!(fs.counters.total, wf.counters.total);
    assert_eq!(fs.counters.arithmetic, nf.counters.arithmetic);
    assert_eq!(fs.counters.logical, nf.counters.logical);
    assert_eq!(fs.counters.memory_access, nf.counters.memory_access);
    assert_eq!(fs.counters.control_transfer, nf.counters.control_transfer);
}

#[test]
fn r0_is_always_zero_in_the_final_dump() {
    let image = assemble(&[
        Instruction::AddI { rt: 0, rs: 0, imm: 42 },
        Instruction::Halt,
    ]);
    for mode in [Mode::Fs, Mode::Nf, Mode::Wf] {
        let m = run_mode(&image, mode);
        assert_eq!(m.gpr.read(0), 0);
    }
}

#[test]
fn arithmetic_with_no_hazards() {
    let image = assemble(&[
        Instruction::AddI { rt: 1, rs: 0, imm: 5 },
        Instruction::AddI { rt: 2, rs: 0, imm: 7 },
        Instruction::Add { rd: 3, rs: 1, rt: 2 },
        Instruction::Halt,
    ]);
    assert_modes_agree(&image);

    let fs = run_mode(&image, Mode::Fs);
    assert_eq!(fs.gpr.read(1), 5);
    assert_eq!(fs.gpr.read(2), 7);
    assert_eq!(fs.gpr.read(3), 12);
    assert!(fs.halted);
    assert_eq!(fs.counters.arithmetic, 3);
    assert_eq!(fs.counters.control_transfer, 1);
    assert_eq!(fs.counters.total, 4);

    let nf = run_mode(&image, Mode::Nf).pc;
    let wf = run_mode(&image, Mode::Wf).pc;
    assert_eq!(fs.pc, nf);
    assert_eq!(fs.pc, wf);
}

#[test]
fn raw_hazard_stalls_more_without_forwarding() {
    // ADDI R1,R0,5; ADD R2,R1,R1; HALT -- R2's operands are both R1,
    // produced by the immediately preceding instruction.
    let image = assemble(&[
        Instruction::AddI { rt: 1, rs: 0, imm: 5 },
        Instruction::Add { rd: 2, rs: 1, rt: 1 },
        Instruction::Halt,
    ]);
    assert_modes_agree(&image);

    let fs = run_mode(&image, Mode::Fs);
    assert_eq!(fs.gpr.read(1), 5);
    assert_eq!(fs.gpr.read(2), 10);

    let config = Config::default();
    let trace = NullTrace;
    let nf_timing = sim::run(&image, Mode::Nf, &config, &trace).timing.unwrap();
    let wf_timing = sim::run(&image, Mode::Wf, &config, &trace).timing.unwrap();

    assert_eq!(wf_timing.stalls, 0);
    assert!(nf_timing.stalls >= wf_timing.stalls);
    assert!(nf_timing.cycles >= wf_timing.cycles);
}

#[test]
fn load_use_requires_a_stall_even_with_forwarding() {
    // ADDI R1,R0,0; STW R1,0(R0); LDW R2,0(R0); ADD R3,R2,R2; HALT
    let image = assemble(&[
        Instruction::AddI { rt: 1, rs: 0, imm: 0 },
        Instruction::Stw { rt: 1, rs: 0, imm: 0 },
        Instruction::Ldw { rt: 2, rs: 0, imm: 0 },
        Instruction::Add { rd: 3, rs: 2, rt: 2 },
        Instruction::Halt,
    ]);
    assert_modes_agree(&image);

    let fs = run_mode(&image, Mode::Fs);
    assert_eq!(fs.gpr.read(2), 0);
    assert_eq!(fs.gpr.read(3), 0);
    assert_eq!(fs.mem.words()[0], 0);

    let config = Config::default();
    let trace = NullTrace;
    let wf_timing = sim::run(&image, Mode::Wf, &config, &trace).timing.unwrap();
    let nf_timing = sim::run(&image, Mode::Nf, &config, &trace).timing.unwrap();

    assert_eq!(wf_timing.stalls, 1);
    assert!(nf_timing.stalls >= 2);
}

#[test]
fn backward_and_forward_taken_branches_converge() {
    // R1 starts at -2 and counts up to 0 through a backward-branching
    // loop, then BZ takes a forward branch out of the loop to HALT.
    let image = assemble(&[
        Instruction::AddI { rt: 1, rs: 0, imm: -2 }, // 0: R1 = -2
        Instruction::AddI { rt: 1, rs: 1, imm: 1 },  // 4: loop body, R1 += 1
        Instruction::Bz { rs: 1, imm: 2 },           // 8: if R1==0, exit to 16
        Instruction::Beq { rs: 0, rt: 0, imm: -2 },  // 12: always taken, back to 4
        Instruction::Halt,                           // 16
    ]);
    assert_modes_agree(&image);

    let fs = run_mode(&image, Mode::Fs);
    assert_eq!(fs.gpr.read(1), 0);
    assert_eq!(fs.pc, 20);
    assert!(fs.halted);
    // Every BZ/BEQ retirement counts as control-transfer whether or not
    // it is taken: BZ (not taken), BEQ (taken), BZ (taken), HALT.
    assert_eq!(fs.counters.control_transfer, 4);

    let config = Config::default();
    let trace = NullTrace;
    let nf_timing = sim::run(&image, Mode::Nf, &config, &trace).timing.unwrap();
    let wf_timing = sim::run(&image, Mode::Wf, &config, &trace).timing.unwrap();
    assert_eq!(nf_timing.flushes, 4);
    assert_eq!(wf_timing.flushes, 4);
}

#[test]
fn jr_sets_pc_absolutely_and_skips_the_fallthrough_halt() {
    // ADDI R1,R0,12; JR R1; HALT@4 (skipped); ADDI R2,R0,99@12; HALT@16
    let image = assemble(&[
        Instruction::AddI { rt: 1, rs: 0, imm: 12 }, // 0
        Instruction::Jr { rs: 1 },                   // 4
        Instruction::Halt,                           // 8 (dead, never retired)
        Instruction::AddI { rt: 2, rs: 0, imm: 99 },  // 12
        Instruction::Halt,                           // 16
    ]);
    assert_modes_agree(&image);

    let fs = run_mode(&image, Mode::Fs);
    assert_eq!(fs.gpr.read(1), 12);
    assert_eq!(fs.gpr.read(2), 99);
    assert_eq!(fs.pc, 20);
    assert!(fs.halted);
}

#[test]
fn unaligned_store_is_a_diagnostic_in_normal_mode_but_fatal_in_strict_mode() {
    let image = assemble(&[
        Instruction::Stw { rt: 0, rs: 0, imm: 1 },
        Instruction::Halt,
    ]);

    for mode in [Mode::Fs, Mode::Nf, Mode::Wf] {
        let m = run_mode(&image, mode);
        assert!(m.halted);
        assert!(m.mem.words().iter().all(|&w| w == 0));
        assert!(!m.mem.changed().iter().any(|&c| c));
    }

    for mode in [Mode::Fs, Mode::Nf, Mode::Wf] {
        assert!(run_mode_strict_is_err(&image, mode));
    }
}
