//! Instruction Encoder.
//!
//! Packs an instruction into its fixed-size little-endian byte block. Field
//! boundaries are not byte-aligned, so packing goes through a single wide
//! accumulator (`u128`, covering the 94 defined bits of the widest opcode)
//! with explicit shifts rather than any struct overlay.
//!
//! A field value wider than its declared bit range is a caller error and
//! fails with [`EncodeError`]; the encoder never silently truncates.

use crate::common::error::EncodeError;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::{
    ADDR_BITS, FIELD_B_SHIFT, FIELD_C_SHIFT, FIELD_D_SHIFT, IMM_BITS, Opcode,
};

/// Encodes an instruction into its fixed-size byte block.
///
/// The opcode tag lands in bits 0–6 and each operand field in its assigned
/// bit range; reserved bits up to the byte-aligned size stay zero. The
/// returned vector's length is exactly [`Opcode::size`].
///
/// # Errors
///
/// Returns [`EncodeError`] if any field value does not fit its bit range.
pub fn encode(inst: &Instruction) -> Result<Vec<u8>, EncodeError> {
    let opcode = inst.opcode();
    let mut word = u128::from(opcode.tag());

    match *inst {
        Instruction::LoadConst { b, c } => {
            pack(&mut word, opcode, "B", b, FIELD_B_SHIFT, ADDR_BITS)?;
            pack(&mut word, opcode, "C", c, FIELD_C_SHIFT, IMM_BITS)?;
        }
        Instruction::ReadMem { b, c } | Instruction::WriteMem { b, c } => {
            pack(&mut word, opcode, "B", b, FIELD_B_SHIFT, ADDR_BITS)?;
            pack(&mut word, opcode, "C", c, FIELD_C_SHIFT, ADDR_BITS)?;
        }
        Instruction::BitwiseOr { b, c, d } => {
            pack(&mut word, opcode, "B", b, FIELD_B_SHIFT, ADDR_BITS)?;
            pack(&mut word, opcode, "C", c, FIELD_C_SHIFT, ADDR_BITS)?;
            pack(&mut word, opcode, "D", d, FIELD_D_SHIFT, ADDR_BITS)?;
        }
    }

    Ok(word.to_le_bytes()[..opcode.size()].to_vec())
}

/// Writes `value` into the accumulator at `shift`, rejecting values wider
/// than `bits`.
fn pack(
    word: &mut u128,
    opcode: Opcode,
    field: &'static str,
    value: u32,
    shift: u32,
    bits: u32,
) -> Result<(), EncodeError> {
    if u64::from(value) >> bits != 0 {
        return Err(EncodeError {
            opcode,
            field,
            value: u64::from(value),
            bits,
        });
    }
    *word |= u128::from(value) << shift;
    Ok(())
}
