//! Global System Constants.
//!
//! This module defines system-wide constants used across the virtual machine:
//! 1. **Memory Constants:** Sizes of the code and data memories.
//! 2. **Word Constants:** Geometry of the 24-bit data word.
//! 3. **Instruction Constants:** The opcode tag mask.
//! 4. **Execution Constants:** The runaway-execution cap.

/// Size of code memory in bytes (64 KiB).
pub const CODE_MEMORY_SIZE: usize = 65536;

/// Size of data memory in bytes (64 KiB).
pub const DATA_MEMORY_SIZE: usize = 65536;

/// Number of bytes occupied by one data word (24-bit, little-endian).
pub const WORD_BYTES: usize = 3;

/// Value mask for a 24-bit data word.
pub const WORD_MASK: u32 = 0x00FF_FFFF;

/// Bit mask for extracting the opcode tag from an instruction's first byte.
pub const OPCODE_MASK: u8 = 0x7F;

/// Maximum number of instructions executed per run.
///
/// The instruction set has no branches, so loops are impossible and a
/// well-formed program cannot legitimately need more; the cap bounds
/// execution time against malformed or hand-crafted pathological images.
pub const INSTRUCTION_CAP: u64 = 1000;
