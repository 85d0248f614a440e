//! Assembler.
//!
//! Translates an ordered list of instruction records into one binary image:
//! 1. **Validation:** every record names a recognized opcode, supplies all
//!    required fields, and every value fits its field's bit width. The first
//!    violation aborts with the record's position; no partial output.
//! 2. **Encoding:** each instruction is encoded via the ISA layer into its
//!    fixed-size block; blocks are concatenated back-to-back in program
//!    order, with no padding or alignment between them.

/// Program source schema and parsing (JSON record list).
pub mod source;

pub use source::{SourceRecord, parse_program};

use crate::common::error::AssembleError;
use crate::isa::encode::encode;
use crate::isa::instruction::Instruction;

/// Validates every record and lowers the program to typed instructions.
///
/// Program order is preserved; it is the execution order.
///
/// # Errors
///
/// [`AssembleError::FieldOutOfRange`] for the first record whose field value
/// exceeds its bit width.
pub fn lower(records: &[SourceRecord]) -> Result<Vec<Instruction>, AssembleError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.to_instruction(index))
        .collect()
}

/// Assembles a program into its binary image.
///
/// # Errors
///
/// Any validation error from [`lower`]; nothing is emitted past the first
/// failing record.
pub fn assemble(records: &[SourceRecord]) -> Result<Vec<u8>, AssembleError> {
    let instructions = lower(records)?;

    let mut image = Vec::with_capacity(instructions.iter().map(Instruction::size).sum());
    for (index, inst) in instructions.iter().enumerate() {
        // lower() already bounds every field; a width failure here would be a bug.
        let block =
            encode(inst).map_err(|source| AssembleError::FieldOutOfRange { index, source })?;
        image.extend_from_slice(&block);
    }

    tracing::debug!(
        instructions = instructions.len(),
        bytes = image.len(),
        "assembled program"
    );
    Ok(image)
}
