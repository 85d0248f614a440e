//! Bit-packed-instruction virtual machine library.
//!
//! This crate implements a minimal virtual machine with the following:
//! 1. **ISA:** The opcode table, the bit-level field layout, and the pure
//!    encode/decode functions for the four instructions.
//! 2. **Assembler:** Validation and lowering of a structured program source
//!    into a packed binary image.
//! 3. **Machine:** Code and data memories, the program counter, and the
//!    fetch-decode-execute loop with its execution trace.
//! 4. **Report:** The structured final-state record (program counter,
//!    executed count, halt cause, memory dump).
//!
//! The instruction set has no control flow: programs run front to back and
//! terminate by running out of decodable bytes or hitting the execution cap.

/// Assembler: program-source schema, validation, and image generation.
pub mod asm;
/// Common constants and the error taxonomy.
pub mod common;
/// Instruction set: opcodes, field layout, encode, decode.
pub mod isa;
/// The machine state and execution loop.
pub mod machine;
/// The final-state report structure.
pub mod report;

/// Assemble a parsed record list into a binary image.
pub use crate::asm::{assemble, parse_program};
/// The instruction sum type and opcode table.
pub use crate::isa::{Instruction, Opcode};
/// The virtual machine; construct with `Machine::new`.
pub use crate::machine::Machine;
/// Final-state report; build with `RunReport::from_machine`.
pub use crate::report::RunReport;
