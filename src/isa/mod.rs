//! Instruction set definitions: opcode encoding, bit-field extraction,
//! and the decoded instruction sum type.

pub mod decoder;
pub mod opcodes;

pub use decoder::{decode, decode_checked, encode, Instruction};
pub use opcodes::{Decoded, Opcode};
