//! End-to-end pipeline: assemble → binary file → load → execute → report.

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;

use uvm_core::asm::{assemble, parse_program};
use uvm_core::common::constants::DATA_MEMORY_SIZE;
use uvm_core::machine::Machine;
use uvm_core::report::RunReport;

/// The worked example: store a constant, copy it, OR two words.
const PROGRAM: &str = r#"[
    { "load_const": { "B": 10, "C": "0x0F0F0F" } },
    { "load_const": { "B": 20, "C": "0xF0F0F0" } },
    { "bitwise_or": { "B": 10, "C": 20, "D": 30 } }
]"#;

#[test]
fn assemble_run_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let bin_path = dir.path().join("program.bin");

    // Assemble to a file, as the CLI does.
    let records = parse_program(PROGRAM).unwrap();
    let image = assemble(&records).unwrap();
    fs::write(&bin_path, &image).unwrap();

    // Load the file back and execute.
    let loaded = fs::read(&bin_path).unwrap();
    let mut machine = Machine::new();
    machine.load_program(&loaded).unwrap();
    machine.run();

    assert_eq!(machine.instructions_executed(), 3);
    assert_eq!(machine.data().dump_range(30, 33), &[0xFF, 0xFF, 0xFF]);

    // Two 8-byte LOAD_CONSTs and one 12-byte BITWISE_OR; the machine then
    // runs into zeroed code memory and halts.
    let report = RunReport::from_machine(&machine, 28, 34);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "pc_final": 28,
            "instructions_executed": 3,
            "halt": { "unknown_opcode": { "pc": 28, "byte": 0 } },
            "data_memory": {
                "start": 28,
                "end": 34,
                "bytes": "0000ffffff00"
            }
        })
    );
}

#[test]
fn report_default_range_covers_the_low_page() {
    let records = parse_program(r#"[{ "load_const": { "B": 0, "C": 1 } }]"#).unwrap();
    let mut machine = Machine::new();
    machine.load_program(&assemble(&records).unwrap()).unwrap();
    machine.run();

    let report = RunReport::from_machine(&machine, 0, uvm_core::report::DEFAULT_DUMP_END);
    assert_eq!(report.data_memory.start, 0);
    assert_eq!(report.data_memory.end, 256);
    // 256 bytes, two hex digits each; the stored word leads.
    assert_eq!(report.data_memory.bytes.len(), 512);
    assert!(report.data_memory.bytes.starts_with("010000"));
}

#[test]
fn report_range_is_clamped_to_memory_size() {
    let machine = Machine::new();
    let report = RunReport::from_machine(&machine, 0, DATA_MEMORY_SIZE + 1000);
    assert_eq!(report.data_memory.end, DATA_MEMORY_SIZE);
    assert_eq!(report.data_memory.bytes.len(), DATA_MEMORY_SIZE * 2);
}

#[test]
fn report_on_a_fresh_machine_has_no_halt_cause() {
    let machine = Machine::new();
    let report = RunReport::from_machine(&machine, 0, 4);
    assert_eq!(report.pc_final, 0);
    assert_eq!(report.instructions_executed, 0);
    assert_eq!(report.halt, None);
    assert_eq!(report.data_memory.bytes, "00000000");
}
