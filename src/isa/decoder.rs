//! Instruction decoding: bit extraction, classification, and the
//! `Instruction` sum type consumed by the Functional Executor.

use crate::common::ExecFault;
use crate::isa::opcodes::{extract, Decoded, Opcode};

/// A classified instruction, carrying only the operand fields its opcode
/// actually uses. `Nop` is the pipeline's bubble marker, never produced
/// from a well-formed word in an image but substituted for any word that
/// fails to classify.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Add { rd: u8, rs: u8, rt: u8 },
    Sub { rd: u8, rs: u8, rt: u8 },
    Mul { rd: u8, rs: u8, rt: u8 },
    Or { rd: u8, rs: u8, rt: u8 },
    And { rd: u8, rs: u8, rt: u8 },
    Xor { rd: u8, rs: u8, rt: u8 },

    AddI { rt: u8, rs: u8, imm: i32 },
    SubI { rt: u8, rs: u8, imm: i32 },
    MulI { rt: u8, rs: u8, imm: i32 },
    OrI { rt: u8, rs: u8, imm: i32 },
    AndI { rt: u8, rs: u8, imm: i32 },
    XorI { rt: u8, rs: u8, imm: i32 },

    Ldw { rt: u8, rs: u8, imm: i32 },
    Stw { rt: u8, rs: u8, imm: i32 },

    Bz { rs: u8, imm: i32 },
    Beq { rs: u8, rt: u8, imm: i32 },
    Jr { rs: u8 },
    Halt,

    /// Bubble / normalized-invalid marker. Never fetched from a valid
    /// image; occupies latches that carry no real instruction.
    Nop,
}

impl Instruction {
    /// The register this instruction writes, if any. `None` for
    /// branches, stores, HALT, and NOP — used uniformly by hazard
    /// detection and forwarding (see the data hazard rules).
    pub fn dest(&self) -> Option<u8> {
        match *self {
            Instruction::Add { rd, .. }
            | Instruction::Sub { rd, .. }
            | Instruction::Mul { rd, .. }
            | Instruction::Or { rd, .. }
            | Instruction::And { rd, .. }
            | Instruction::Xor { rd, .. } => Some(rd),
            Instruction::AddI { rt, .. }
            | Instruction::SubI { rt, .. }
            | Instruction::MulI { rt, .. }
            | Instruction::OrI { rt, .. }
            | Instruction::AndI { rt, .. }
            | Instruction::XorI { rt, .. }
            | Instruction::Ldw { rt, .. } => Some(rt),
            _ => None,
        }
    }

    /// Source registers read by this instruction (0, 1, or 2 of them).
    pub fn sources(&self) -> [Option<u8>; 2] {
        match *self {
            Instruction::Add { rs, rt, .. }
            | Instruction::Sub { rs, rt, .. }
            | Instruction::Mul { rs, rt, .. }
            | Instruction::Or { rs, rt, .. }
            | Instruction::And { rs, rt, .. }
            | Instruction::Xor { rs, rt, .. } => [Some(rs), Some(rt)],
            Instruction::AddI { rs, .. }
            | Instruction::SubI { rs, .. }
            | Instruction::MulI { rs, .. }
            | Instruction::OrI { rs, .. }
            | Instruction::AndI { rs, .. }
            | Instruction::XorI { rs, .. }
            | Instruction::Ldw { rs, .. } => [Some(rs), None],
            Instruction::Stw { rs, rt, .. } | Instruction::Beq { rs, rt, .. } => {
                [Some(rs), Some(rt)]
            }
            Instruction::Bz { rs, .. } | Instruction::Jr { rs } => [Some(rs), None],
            Instruction::Halt | Instruction::Nop => [None, None],
        }
    }

    pub fn is_nop(&self) -> bool {
        matches!(self, Instruction::Nop)
    }
}

/// Extracts the raw bit fields of a word into a [`Decoded`] record,
/// always fully populated, before classification. Mirrors the corpus's
/// two-step decode (raw fields, then a typed control record).
pub fn decode_raw(word: u32) -> Option<Decoded> {
    let (opcode_bits, rs, rt, rd, imm) = extract(word);
    let opcode = Opcode::from_bits(opcode_bits)?;
    Some(Decoded {
        opcode,
        rs,
        rt,
        rd,
        imm,
    })
}

/// Classifies a raw decoded word into an [`Instruction`].
///
/// An opcode outside the defined set decodes to `Instruction::Nop`; the
/// caller is responsible for emitting the non-fatal diagnostic this
/// implies (see the error handling design).
pub fn decode(word: u32) -> Instruction {
    let raw = match decode_raw(word) {
        Some(raw) => raw,
        None => return Instruction::Nop,
    };
    let Decoded {
        opcode,
        rs,
        rt,
        rd,
        imm,
    } = raw;

    match opcode {
        Opcode::Add => Instruction::Add { rd, rs, rt },
        Opcode::Sub => Instruction::Sub { rd, rs, rt },
        Opcode::Mul => Instruction::Mul { rd, rs, rt },
        Opcode::Or => Instruction::Or { rd, rs, rt },
        Opcode::And => Instruction::And { rd, rs, rt },
        Opcode::Xor => Instruction::Xor { rd, rs, rt },
        Opcode::AddI => Instruction::AddI { rt, rs, imm },
        Opcode::SubI => Instruction::SubI { rt, rs, imm },
        Opcode::MulI => Instruction::MulI { rt, rs, imm },
        Opcode::OrI => Instruction::OrI { rt, rs, imm },
        Opcode::AndI => Instruction::AndI { rt, rs, imm },
        Opcode::XorI => Instruction::XorI { rt, rs, imm },
        Opcode::Ldw => Instruction::Ldw { rt, rs, imm },
        Opcode::Stw => Instruction::Stw { rt, rs, imm },
        Opcode::Bz => Instruction::Bz { rs, imm },
        Opcode::Beq => Instruction::Beq { rs, rt, imm },
        Opcode::Jr => Instruction::Jr { rs },
        Opcode::Halt => Instruction::Halt,
        Opcode::Nop => Instruction::Nop,
    }
}

/// Decodes `word` like [`decode`], additionally reporting an
/// [`ExecFault::UnknownOpcode`] when the raw opcode field matched
/// nothing in the defined set. Both the FS read-execute loop and the
/// pipeline's fetch stage decode through this so the diagnostic fires
/// the same way regardless of mode.
pub fn decode_checked(word: u32) -> (Instruction, Option<ExecFault>) {
    if decode_raw(word).is_none() {
        (Instruction::Nop, Some(ExecFault::UnknownOpcode(word)))
    } else {
        (decode(word), None)
    }
}

fn pack(opcode: Opcode, rs: u8, rt: u8, rd: u8, imm: i32) -> u32 {
    let imm16 = (imm as i16) as u16 as u32;
    (opcode.bits() << 26) | ((rs as u32 & 0x1F) << 21) | ((rt as u32 & 0x1F) << 16)
        | ((rd as u32 & 0x1F) << 11)
        | imm16
}

/// Inverse of [`decode`], used only by round-trip tests; not on the
/// simulation hot path.
pub fn encode(instr: Instruction) -> u32 {
    match instr {
        Instruction::Add { rd, rs, rt } => pack(Opcode::Add, rs, rt, rd, 0),
        Instruction::Sub { rd, rs, rt } => pack(Opcode::Sub, rs, rt, rd, 0),
        Instruction::Mul { rd, rs, rt } => pack(Opcode::Mul, rs, rt, rd, 0),
        Instruction::Or { rd, rs, rt } => pack(Opcode::Or, rs, rt, rd, 0),
        Instruction::And { rd, rs, rt } => pack(Opcode::And, rs, rt, rd, 0),
        Instruction::Xor { rd, rs, rt } => pack(Opcode::Xor, rs, rt, rd, 0),
        Instruction::AddI { rt, rs, imm } => pack(Opcode::AddI, rs, rt, 0, imm),
        Instruction::SubI { rt, rs, imm } => pack(Opcode::SubI, rs, rt, 0, imm),
        Instruction::MulI { rt, rs, imm } => pack(Opcode::MulI, rs, rt, 0, imm),
        Instruction::OrI { rt, rs, imm } => pack(Opcode::OrI, rs, rt, 0, imm),
        Instruction::AndI { rt, rs, imm } => pack(Opcode::AndI, rs, rt, 0, imm),
        Instruction::XorI { rt, rs, imm } => pack(Opcode::XorI, rs, rt, 0, imm),
        Instruction::Ldw { rt, rs, imm } => pack(Opcode::Ldw, rs, rt, 0, imm),
        Instruction::Stw { rt, rs, imm } => pack(Opcode::Stw, rs, rt, 0, imm),
        Instruction::Bz { rs, imm } => pack(Opcode::Bz, rs, 0, 0, imm),
        Instruction::Beq { rs, rt, imm } => pack(Opcode::Beq, rs, rt, 0, imm),
        Instruction::Jr { rs } => pack(Opcode::Jr, rs, 0, 0, 0),
        Instruction::Halt => pack(Opcode::Halt, 0, 0, 0, 0),
        Instruction::Nop => pack(Opcode::Nop, 0, 0, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_r_type() {
        let word = (0x00 << 26) | (1 << 21) | (2 << 16) | (3 << 11);
        assert_eq!(decode(word), Instruction::Add { rd: 3, rs: 1, rt: 2 });
    }

    #[test]
    fn decodes_negative_immediate() {
        let word = (0x0E << 26) | (1 << 21) | (0xFFFEu32 & 0xFFFF);
        assert_eq!(decode(word), Instruction::Bz { rs: 1, imm: -2 });
    }

    #[test]
    fn unknown_opcode_becomes_nop() {
        let word = 0x3Fu32 << 26;
        assert_eq!(decode(word), Instruction::Nop);
    }

    #[test]
    fn round_trip_every_class() {
        let samples = [
            Instruction::Add { rd: 3, rs: 1, rt: 2 },
            Instruction::AddI { rt: 1, rs: 0, imm: 5 },
            Instruction::Ldw { rt: 2, rs: 0, imm: -4 },
            Instruction::Bz { rs: 1, imm: -2 },
            Instruction::Beq { rs: 1, rt: 2, imm: 3 },
            Instruction::Jr { rs: 1 },
            Instruction::Halt,
        ];
        for instr in samples {
            assert_eq!(decode(encode(instr)), instr);
        }
    }
}
