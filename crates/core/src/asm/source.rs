//! Program Source Schema.
//!
//! The assembler's input is a JSON array of single-key objects: the key names
//! an opcode (`load_const`, `read_mem`, `write_mem`, `bitwise_or`) and maps to
//! an object with integer-valued fields `B`, `C`, and — for `bitwise_or`
//! only — `D`. Integer values are accepted either as plain numbers or as
//! `0x`-prefixed hexadecimal strings; both parse identically.
//!
//! ```json
//! [
//!     { "load_const": { "B": 10, "C": "0x0ABCDE" } },
//!     { "read_mem":   { "B": 20, "C": 10 } }
//! ]
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::common::error::{AssembleError, EncodeError};
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::{ADDR_BITS, IMM_BITS, Opcode};

/// One instruction record as it appears in the program source.
///
/// Field values are held as raw `u64` so that out-of-range literals survive
/// parsing and are rejected with a precise width error during validation
/// rather than a generic integer-overflow message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum SourceRecord {
    /// `{"load_const": {"B": …, "C": …}}`
    LoadConst {
        /// Destination address.
        #[serde(rename = "B", deserialize_with = "int_literal")]
        b: u64,
        /// Immediate value.
        #[serde(rename = "C", deserialize_with = "int_literal")]
        c: u64,
    },

    /// `{"read_mem": {"B": …, "C": …}}`
    ReadMem {
        /// Destination address.
        #[serde(rename = "B", deserialize_with = "int_literal")]
        b: u64,
        /// Source address.
        #[serde(rename = "C", deserialize_with = "int_literal")]
        c: u64,
    },

    /// `{"write_mem": {"B": …, "C": …}}`
    WriteMem {
        /// Source address.
        #[serde(rename = "B", deserialize_with = "int_literal")]
        b: u64,
        /// Destination address.
        #[serde(rename = "C", deserialize_with = "int_literal")]
        c: u64,
    },

    /// `{"bitwise_or": {"B": …, "C": …, "D": …}}`
    BitwiseOr {
        /// First operand address.
        #[serde(rename = "B", deserialize_with = "int_literal")]
        b: u64,
        /// Second operand address.
        #[serde(rename = "C", deserialize_with = "int_literal")]
        c: u64,
        /// Result address.
        #[serde(rename = "D", deserialize_with = "int_literal")]
        d: u64,
    },
}

impl SourceRecord {
    /// Returns the opcode this record names.
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::LoadConst { .. } => Opcode::LoadConst,
            Self::ReadMem { .. } => Opcode::ReadMem,
            Self::WriteMem { .. } => Opcode::WriteMem,
            Self::BitwiseOr { .. } => Opcode::BitwiseOr,
        }
    }

    /// Validates field widths and lowers the record to an [`Instruction`].
    ///
    /// `index` is the record's position in the source list, reported in any
    /// width violation.
    pub(crate) fn to_instruction(self, index: usize) -> Result<Instruction, AssembleError> {
        let opcode = self.opcode();
        match self {
            Self::LoadConst { b, c } => Ok(Instruction::LoadConst {
                b: field(index, opcode, "B", b, ADDR_BITS)?,
                c: field(index, opcode, "C", c, IMM_BITS)?,
            }),
            Self::ReadMem { b, c } => Ok(Instruction::ReadMem {
                b: field(index, opcode, "B", b, ADDR_BITS)?,
                c: field(index, opcode, "C", c, ADDR_BITS)?,
            }),
            Self::WriteMem { b, c } => Ok(Instruction::WriteMem {
                b: field(index, opcode, "B", b, ADDR_BITS)?,
                c: field(index, opcode, "C", c, ADDR_BITS)?,
            }),
            Self::BitwiseOr { b, c, d } => Ok(Instruction::BitwiseOr {
                b: field(index, opcode, "B", b, ADDR_BITS)?,
                c: field(index, opcode, "C", c, ADDR_BITS)?,
                d: field(index, opcode, "D", d, ADDR_BITS)?,
            }),
        }
    }
}

/// Checks that `value` fits `bits` and narrows it for encoding.
fn field(
    index: usize,
    opcode: Opcode,
    name: &'static str,
    value: u64,
    bits: u32,
) -> Result<u32, AssembleError> {
    if value >> bits != 0 {
        return Err(AssembleError::FieldOutOfRange {
            index,
            source: EncodeError {
                opcode,
                field: name,
                value,
                bits,
            },
        });
    }
    Ok(value as u32)
}

/// Parses a program source document into its ordered record list.
///
/// The document must be a JSON array; each element is validated
/// individually so errors carry the offending record's index.
///
/// # Errors
///
/// [`AssembleError::InvalidDocument`] if the document is not an array,
/// [`AssembleError::InvalidRecord`] for the first malformed element.
pub fn parse_program(text: &str) -> Result<Vec<SourceRecord>, AssembleError> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(text).map_err(|e| AssembleError::InvalidDocument(e.to_string()))?;

    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| AssembleError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Accepts an integer literal as a JSON number or a `0x`-prefixed
/// hexadecimal string.
fn int_literal<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Literal {
        Number(u64),
        Text(String),
    }

    match Literal::deserialize(deserializer)? {
        Literal::Number(n) => Ok(n),
        Literal::Text(s) => parse_text_literal(&s).map_err(D::Error::custom),
    }
}

/// Parses a textual integer literal: `0x`-prefixed hexadecimal or decimal.
fn parse_text_literal(text: &str) -> Result<u64, String> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
            .map_err(|e| format!("invalid hexadecimal literal {trimmed:?}: {e}"))
    } else {
        trimmed
            .parse()
            .map_err(|e| format!("invalid integer literal {trimmed:?}: {e}"))
    }
}
