//! Instruction Decoder.
//!
//! Reads an instruction out of a byte buffer at a given offset: the opcode
//! tag comes from the low 7 bits of the first byte, the opcode's fixed byte
//! count is assembled into one little-endian accumulator, and each operand
//! field is extracted by shift-and-mask. The consumed byte count is returned
//! so the caller can advance its cursor.

use crate::common::constants::OPCODE_MASK;
use crate::common::error::DecodeError;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::{
    ADDR_BITS, FIELD_B_SHIFT, FIELD_C_SHIFT, FIELD_D_SHIFT, IMM_BITS, Opcode,
};

/// Decodes the instruction at `offset` within `code`.
///
/// Returns the instruction together with the number of bytes it occupies.
/// Reserved bits past the last defined field are ignored.
///
/// # Errors
///
/// * [`DecodeError::UnknownOpcode`] — the tag matches no operation.
/// * [`DecodeError::Truncated`] — fewer bytes remain than the matched
///   opcode's fixed size requires (or `offset` is past the end).
pub fn decode(code: &[u8], offset: usize) -> Result<(Instruction, usize), DecodeError> {
    let Some(&first) = code.get(offset) else {
        return Err(DecodeError::Truncated {
            offset,
            required: 1,
            available: 0,
        });
    };

    let Some(opcode) = Opcode::from_tag(first & OPCODE_MASK) else {
        return Err(DecodeError::UnknownOpcode {
            offset,
            byte: first,
        });
    };

    let required = opcode.size();
    let available = code.len() - offset;
    if available < required {
        return Err(DecodeError::Truncated {
            offset,
            required,
            available,
        });
    }

    let word = accumulate(&code[offset..offset + required]);
    let b = extract(word, FIELD_B_SHIFT, ADDR_BITS);

    let inst = match opcode {
        Opcode::LoadConst => Instruction::LoadConst {
            b,
            c: extract(word, FIELD_C_SHIFT, IMM_BITS),
        },
        Opcode::ReadMem => Instruction::ReadMem {
            b,
            c: extract(word, FIELD_C_SHIFT, ADDR_BITS),
        },
        Opcode::WriteMem => Instruction::WriteMem {
            b,
            c: extract(word, FIELD_C_SHIFT, ADDR_BITS),
        },
        Opcode::BitwiseOr => Instruction::BitwiseOr {
            b,
            c: extract(word, FIELD_C_SHIFT, ADDR_BITS),
            d: extract(word, FIELD_D_SHIFT, ADDR_BITS),
        },
    };

    Ok((inst, required))
}

/// Folds an instruction's bytes into one little-endian accumulator.
fn accumulate(bytes: &[u8]) -> u128 {
    bytes
        .iter()
        .rev()
        .fold(0u128, |acc, &byte| (acc << 8) | u128::from(byte))
}

/// Extracts a `bits`-wide field starting at bit `shift`.
#[inline]
fn extract(word: u128, shift: u32, bits: u32) -> u32 {
    ((word >> shift) & ((1u128 << bits) - 1)) as u32
}
