//! Virtual Machine.
//!
//! Owns the two memories and the program counter, and drives the
//! fetch-decode-execute loop:
//! 1. **Fetch/Decode:** the instruction at `pc` is decoded via the ISA layer.
//!    A decode failure (unknown opcode byte, truncated instruction) is the
//!    machine's normal termination signal — there is no HALT opcode.
//! 2. **Execute:** the opcode's effect is applied to data memory.
//! 3. **Advance:** `pc` moves past the decoded instruction and the executed
//!    counter increments; reaching the instruction cap halts unconditionally.
//!
//! Every executed instruction is recorded as a [`TraceEvent`]; the trace and
//! the final memory state are the machine's observable outputs.

use std::fmt;

use serde::Serialize;

use crate::common::constants::{CODE_MEMORY_SIZE, DATA_MEMORY_SIZE, INSTRUCTION_CAP};
use crate::common::error::{DecodeError, LoadError};
use crate::isa::decode::decode;
use crate::isa::instruction::Instruction;

/// Linear byte memory with word-granular access.
pub mod memory;

pub use memory::Memory;

/// Why the machine stopped.
///
/// Only [`HaltCause::InstructionCap`] distinguishes "ran too long" from the
/// ordinary out-of-instructions endings; none of these are process errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltCause {
    /// The program counter ran past the end of code memory.
    CodeEnd,

    /// The byte at `pc` matches no opcode tag.
    UnknownOpcode {
        /// Program counter at the failed fetch.
        pc: usize,
        /// The raw byte encountered.
        byte: u8,
    },

    /// A matched opcode needed more bytes than code memory holds past `pc`.
    TruncatedInstruction {
        /// Program counter at the failed fetch.
        pc: usize,
        /// Bytes the opcode requires.
        required: usize,
        /// Bytes that remained.
        available: usize,
    },

    /// The fixed cap on executed instructions was reached.
    InstructionCap,
}

impl fmt::Display for HaltCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodeEnd => write!(f, "ran past the end of code memory"),
            Self::UnknownOpcode { pc, byte } => {
                write!(f, "unknown opcode byte {byte:#04x} at PC={pc:#06x}")
            }
            Self::TruncatedInstruction {
                pc,
                required,
                available,
            } => write!(
                f,
                "truncated instruction at PC={pc:#06x}: need {required} bytes, {available} remain"
            ),
            Self::InstructionCap => {
                write!(f, "instruction cap of {INSTRUCTION_CAP} reached")
            }
        }
    }
}

/// One executed instruction: its starting address and decoded fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Code-memory address the instruction was fetched from.
    pub pc: usize,
    /// The decoded instruction.
    pub instruction: Instruction,
}

impl fmt::Display for TraceEvent {
    /// Formats a diagnostic trace line, e.g.
    /// `PC=0x0000 LOAD_CONST B=10 C=703710`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PC={:#06X} {}", self.pc, self.instruction)
    }
}

/// The virtual machine: code and data memories, program counter, and the
/// execution trace.
///
/// State is an explicit value — pass it by exclusive reference into the loop
/// and inspect it fully afterward.
#[derive(Clone, Debug)]
pub struct Machine {
    code: Memory,
    data: Memory,
    pc: usize,
    halted: bool,
    instructions_executed: u64,
    halt_cause: Option<HaltCause>,
    trace: Vec<TraceEvent>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Creates a machine with zero-initialized 64 KiB code and data memories.
    pub fn new() -> Self {
        Self {
            code: Memory::new(CODE_MEMORY_SIZE),
            data: Memory::new(DATA_MEMORY_SIZE),
            pc: 0,
            halted: false,
            instructions_executed: 0,
            halt_cause: None,
            trace: Vec::new(),
        }
    }

    /// Loads a binary image verbatim at the start of code memory.
    ///
    /// # Errors
    ///
    /// [`LoadError::TooLarge`] if the image exceeds code memory capacity;
    /// execution never begins.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.code.load_image(image)?;
        tracing::debug!(bytes = image.len(), "program loaded");
        Ok(())
    }

    /// Runs the fetch-decode-execute loop until the machine halts.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Executes at most one instruction.
    ///
    /// Returns `true` if an instruction executed and the machine can
    /// continue. Decode failure records the halt cause without executing
    /// anything further; the executed counter is left unchanged.
    pub fn step(&mut self) -> bool {
        if self.halted {
            return false;
        }
        if self.pc >= self.code.len() {
            self.halt(HaltCause::CodeEnd);
            return false;
        }

        let (instruction, size) = match decode(self.code.as_bytes(), self.pc) {
            Ok(decoded) => decoded,
            Err(DecodeError::UnknownOpcode { offset, byte }) => {
                self.halt(HaltCause::UnknownOpcode { pc: offset, byte });
                return false;
            }
            Err(DecodeError::Truncated {
                offset,
                required,
                available,
            }) => {
                self.halt(HaltCause::TruncatedInstruction {
                    pc: offset,
                    required,
                    available,
                });
                return false;
            }
        };

        self.execute(&instruction);
        tracing::trace!(pc = self.pc, %instruction, "executed");
        self.trace.push(TraceEvent {
            pc: self.pc,
            instruction,
        });

        self.pc += size;
        self.instructions_executed += 1;
        if self.instructions_executed >= INSTRUCTION_CAP {
            self.halt(HaltCause::InstructionCap);
            return false;
        }
        true
    }

    /// Applies one instruction's effect to data memory.
    ///
    /// Addresses are used as given; out-of-bound byte positions are skipped
    /// by the partial-word policy, never faulted.
    fn execute(&mut self, instruction: &Instruction) {
        match *instruction {
            Instruction::LoadConst { b, c } => self.data.write_word(b, c),
            Instruction::ReadMem { b, c } => {
                let word = self.data.read_word(c);
                self.data.write_word(b, word);
            }
            Instruction::WriteMem { b, c } => {
                let word = self.data.read_word(b);
                self.data.write_word(c, word);
            }
            Instruction::BitwiseOr { b, c, d } => {
                let word = self.data.read_word(b) | self.data.read_word(c);
                self.data.write_word(d, word);
            }
        }
    }

    fn halt(&mut self, cause: HaltCause) {
        tracing::debug!(
            %cause,
            pc = self.pc,
            executed = self.instructions_executed,
            "machine halted"
        );
        self.halted = true;
        self.halt_cause = Some(cause);
    }

    /// Current program counter (byte offset into code memory).
    #[inline]
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Whether the machine has halted.
    #[inline]
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Total instructions executed so far.
    #[inline]
    pub fn instructions_executed(&self) -> u64 {
        self.instructions_executed
    }

    /// Why the machine halted, once it has.
    #[inline]
    pub fn halt_cause(&self) -> Option<&HaltCause> {
        self.halt_cause.as_ref()
    }

    /// The execution trace, one event per executed instruction.
    #[inline]
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    /// Data memory, for inspection.
    #[inline]
    pub fn data(&self) -> &Memory {
        &self.data
    }

    /// Mutable data memory, for seeding state before a run.
    #[inline]
    pub fn data_mut(&mut self) -> &mut Memory {
        &mut self.data
    }
}
