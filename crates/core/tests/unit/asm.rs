//! Assembler — source parsing, validation, and image generation.

use pretty_assertions::assert_eq;

use uvm_core::asm::{SourceRecord, assemble, lower, parse_program};
use uvm_core::common::error::AssembleError;
use uvm_core::isa::{Instruction, Opcode, encode};

// ──────────────────────────────────────────────────────────
// 1. Source parsing
// ──────────────────────────────────────────────────────────

#[test]
fn parses_all_four_opcodes() {
    let records = parse_program(
        r#"[
            { "load_const": { "B": 10, "C": 703710 } },
            { "read_mem":   { "B": 20, "C": 10 } },
            { "write_mem":  { "B": 20, "C": 30 } },
            { "bitwise_or": { "B": 10, "C": 20, "D": 30 } }
        ]"#,
    )
    .unwrap();

    assert_eq!(
        records,
        vec![
            SourceRecord::LoadConst { b: 10, c: 703710 },
            SourceRecord::ReadMem { b: 20, c: 10 },
            SourceRecord::WriteMem { b: 20, c: 30 },
            SourceRecord::BitwiseOr { b: 10, c: 20, d: 30 },
        ]
    );
}

#[test]
fn hexadecimal_and_decimal_literals_parse_identically() {
    let hex = parse_program(r#"[{ "load_const": { "B": "0x0A", "C": "0x0ABCDE" } }]"#).unwrap();
    let dec = parse_program(r#"[{ "load_const": { "B": 10, "C": 703710 } }]"#).unwrap();
    assert_eq!(hex, dec);
}

#[test]
fn uppercase_hex_prefix_is_accepted() {
    let records = parse_program(r#"[{ "read_mem": { "B": "0XFF", "C": 0 } }]"#).unwrap();
    assert_eq!(records, vec![SourceRecord::ReadMem { b: 255, c: 0 }]);
}

#[test]
fn record_order_is_preserved() {
    let records = parse_program(
        r#"[
            { "load_const": { "B": 3, "C": 1 } },
            { "load_const": { "B": 2, "C": 2 } },
            { "load_const": { "B": 1, "C": 3 } }
        ]"#,
    )
    .unwrap();
    let addrs: Vec<u64> = records
        .iter()
        .map(|r| match r {
            SourceRecord::LoadConst { b, .. } => *b,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(addrs, vec![3, 2, 1]);
}

// ──────────────────────────────────────────────────────────
// 2. Validation failures
// ──────────────────────────────────────────────────────────

#[test]
fn document_must_be_a_list() {
    let err = parse_program(r#"{ "load_const": { "B": 0, "C": 0 } }"#).unwrap_err();
    assert!(matches!(err, AssembleError::InvalidDocument(_)));
}

#[test]
fn unknown_opcode_key_is_rejected_with_its_index() {
    let err = parse_program(
        r#"[
            { "load_const": { "B": 0, "C": 0 } },
            { "halt": {} }
        ]"#,
    )
    .unwrap_err();
    assert!(matches!(err, AssembleError::InvalidRecord { index: 1, .. }), "got {err:?}");
}

#[test]
fn bitwise_or_without_d_fails_validation() {
    let err = parse_program(r#"[{ "bitwise_or": { "B": 10, "C": 20 } }]"#).unwrap_err();
    assert!(matches!(err, AssembleError::InvalidRecord { index: 0, .. }), "got {err:?}");
}

#[test]
fn extra_fields_are_rejected() {
    let err = parse_program(r#"[{ "read_mem": { "B": 0, "C": 0, "D": 0 } }]"#).unwrap_err();
    assert!(matches!(err, AssembleError::InvalidRecord { index: 0, .. }), "got {err:?}");
}

#[test]
fn negative_values_are_rejected() {
    let err = parse_program(r#"[{ "load_const": { "B": -1, "C": 0 } }]"#).unwrap_err();
    assert!(matches!(err, AssembleError::InvalidRecord { index: 0, .. }), "got {err:?}");
}

#[test]
fn malformed_hex_literal_is_rejected() {
    let err = parse_program(r#"[{ "load_const": { "B": "0xZZ", "C": 0 } }]"#).unwrap_err();
    assert!(matches!(err, AssembleError::InvalidRecord { index: 0, .. }), "got {err:?}");
}

#[test]
fn oversized_field_is_rejected_with_width_context() {
    // 2^29 does not fit a 29-bit address field.
    let records = parse_program(r#"[{ "write_mem": { "B": 536870912, "C": 0 } }]"#).unwrap();
    let err = assemble(&records).unwrap_err();
    match err {
        AssembleError::FieldOutOfRange { index, source } => {
            assert_eq!(index, 0);
            assert_eq!(source.opcode, Opcode::WriteMem);
            assert_eq!(source.field, "B");
            assert_eq!(source.value, 1 << 29);
            assert_eq!(source.bits, 29);
        }
        other => panic!("expected FieldOutOfRange, got {other:?}"),
    }
}

#[test]
fn oversized_immediate_is_rejected() {
    // 2^24 does not fit LOAD_CONST's 24-bit immediate.
    let records = parse_program(r#"[{ "load_const": { "B": 0, "C": "0x1000000" } }]"#).unwrap();
    assert!(matches!(
        assemble(&records).unwrap_err(),
        AssembleError::FieldOutOfRange { index: 0, .. }
    ));
}

#[test]
fn assembly_stops_at_the_first_invalid_record() {
    let records = parse_program(
        r#"[
            { "load_const": { "B": 0, "C": 0 } },
            { "load_const": { "B": 0, "C": "0x1000000" } },
            { "load_const": { "B": "0x20000000", "C": 0 } }
        ]"#,
    )
    .unwrap();
    // The first failure (record 1) is reported, not the later one.
    assert!(matches!(
        assemble(&records).unwrap_err(),
        AssembleError::FieldOutOfRange { index: 1, .. }
    ));
}

// ──────────────────────────────────────────────────────────
// 3. Image generation
// ──────────────────────────────────────────────────────────

#[test]
fn blocks_are_packed_back_to_back() {
    let records = parse_program(
        r#"[
            { "load_const": { "B": 10, "C": "0x0ABCDE" } },
            { "read_mem":   { "B": 20, "C": 10 } },
            { "bitwise_or": { "B": 10, "C": 20, "D": 30 } }
        ]"#,
    )
    .unwrap();
    let image = assemble(&records).unwrap();

    // 8 + 9 + 12 bytes, no padding between blocks.
    assert_eq!(image.len(), 29);

    let expected: Vec<u8> = [
        encode(&Instruction::LoadConst { b: 10, c: 0x0ABCDE }).unwrap(),
        encode(&Instruction::ReadMem { b: 20, c: 10 }).unwrap(),
        encode(&Instruction::BitwiseOr { b: 10, c: 20, d: 30 }).unwrap(),
    ]
    .concat();
    assert_eq!(image, expected);
}

#[test]
fn lower_produces_typed_instructions_in_order() {
    let records = parse_program(
        r#"[
            { "write_mem": { "B": 1, "C": 2 } },
            { "load_const": { "B": 3, "C": 4 } }
        ]"#,
    )
    .unwrap();
    assert_eq!(
        lower(&records).unwrap(),
        vec![
            Instruction::WriteMem { b: 1, c: 2 },
            Instruction::LoadConst { b: 3, c: 4 },
        ]
    );
}

#[test]
fn empty_program_assembles_to_an_empty_image() {
    let records = parse_program("[]").unwrap();
    assert_eq!(assemble(&records).unwrap(), Vec::<u8>::new());
}
