//! Error definitions for the virtual machine.
//!
//! This module defines the error taxonomy of the system:
//! 1. **Encode Errors:** A field value wider than its declared bit range.
//! 2. **Decode Errors:** Unknown opcode bytes and truncated instructions.
//!    These double as the machine's halt signal — there is no explicit HALT
//!    opcode, so running into unrecognized or incomplete bytes is the normal
//!    termination condition, not a process failure.
//! 3. **Assemble Errors:** Malformed or out-of-range program-source records.
//! 4. **Load Errors:** Images exceeding the code memory capacity.

use thiserror::Error;

use crate::isa::opcodes::Opcode;

/// Error raised when a field value does not fit its declared bit range.
///
/// Encoding must always reflect the field values supplied by the caller; a
/// value too wide for its range fails rather than silently truncating.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{opcode} field {field}: value {value:#x} does not fit {bits} bits")]
pub struct EncodeError {
    /// Opcode being encoded.
    pub opcode: Opcode,
    /// Name of the offending field (`"B"`, `"C"`, or `"D"`).
    pub field: &'static str,
    /// The value that was supplied.
    pub value: u64,
    /// Declared width of the field in bits.
    pub bits: u32,
}

/// Error raised when a byte stream cannot be decoded into an instruction.
///
/// Both variants carry the byte offset at which decoding was attempted so a
/// caller can locate the fault without re-running with extra instrumentation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low 7 bits of the first byte match no opcode tag.
    #[error("unknown opcode byte {byte:#04x} at offset {offset:#06x}")]
    UnknownOpcode {
        /// Byte offset at which decoding was attempted.
        offset: usize,
        /// The raw first byte encountered.
        byte: u8,
    },

    /// A matched opcode requires more bytes than remain in the buffer.
    #[error("truncated instruction at offset {offset:#06x}: need {required} bytes, {available} remain")]
    Truncated {
        /// Byte offset at which decoding was attempted.
        offset: usize,
        /// Byte count required by the matched opcode.
        required: usize,
        /// Bytes remaining in the buffer.
        available: usize,
    },
}

/// Error raised while validating or encoding a program source.
///
/// Assembly stops at the first error and produces no output; every variant
/// names the offending record's position in the source list.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// The document is not a well-formed list of instruction records.
    #[error("invalid program source: {0}")]
    InvalidDocument(String),

    /// A record is malformed: unknown opcode key, missing or extra field,
    /// or an unparseable numeric literal.
    #[error("record {index}: {reason}")]
    InvalidRecord {
        /// Zero-based position of the record in the source list.
        index: usize,
        /// Human-readable description of the violation.
        reason: String,
    },

    /// A field value does not fit the bit range the opcode assigns to it.
    #[error("record {index}: {source}")]
    FieldOutOfRange {
        /// Zero-based position of the record in the source list.
        index: usize,
        /// The underlying field-width violation.
        source: EncodeError,
    },
}

/// Error raised when loading a program image into code memory.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The image is larger than code memory; execution never begins.
    #[error("program of {size} bytes exceeds code memory capacity of {capacity} bytes")]
    TooLarge {
        /// Size of the rejected image in bytes.
        size: usize,
        /// Capacity of code memory in bytes.
        capacity: usize,
    },
}
