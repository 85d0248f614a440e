//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table, the bit-level field layout, and the pure
//! encode/decode functions for the machine's four instructions.
//!
//! # Encoding scheme
//!
//! An instruction is a fixed-size little-endian byte block. Concatenating its
//! bytes least-significant-first yields one wide bit-string: bits 0–6 hold the
//! opcode tag, and each operand field occupies a fixed bit range that is not
//! byte-aligned (field B begins at bit 7, in the middle of the first byte).
//! Bits past the last defined field, up to the block's byte-aligned size, are
//! reserved: zero on encode, ignored on decode.

/// Instruction decoding (byte block → instruction + consumed length).
pub mod decode;

/// Instruction encoding (instruction → fixed-size byte block).
pub mod encode;

/// The instruction sum type and its field accessors.
pub mod instruction;

/// Opcode tags, encoded sizes, and field bit-layout constants.
pub mod opcodes;

pub use decode::decode;
pub use encode::encode;
pub use instruction::Instruction;
pub use opcodes::Opcode;
