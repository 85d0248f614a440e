//! Run Report.
//!
//! The structured record a caller receives after execution: final program
//! counter, executed-instruction count, halt cause, and a hexadecimal dump of
//! a chosen data-memory range. Serialized to JSON by the report writer.

use serde::Serialize;

use crate::machine::{HaltCause, Machine};

/// Default exclusive upper bound of the data-memory dump range.
pub const DEFAULT_DUMP_END: usize = 256;

/// Hexadecimal dump of a data-memory range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryDump {
    /// Inclusive start address of the dumped range.
    pub start: usize,
    /// Exclusive end address, after clamping to the memory size.
    pub end: usize,
    /// The range's bytes as contiguous lowercase hex, two digits per byte.
    pub bytes: String,
}

/// Final machine state as reported to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Program counter at halt.
    pub pc_final: usize,
    /// Total instructions executed.
    pub instructions_executed: u64,
    /// Why the machine stopped (`None` if it has not halted).
    pub halt: Option<HaltCause>,
    /// Dump of the requested data-memory range.
    pub data_memory: MemoryDump,
}

impl RunReport {
    /// Builds the report from a machine, dumping data memory `[start, end)`.
    ///
    /// `end` is clamped to the memory size, and `start` to `end`.
    pub fn from_machine(machine: &Machine, start: usize, end: usize) -> Self {
        let bytes = machine.data().dump_range(start, end);
        Self {
            pc_final: machine.pc(),
            instructions_executed: machine.instructions_executed(),
            halt: machine.halt_cause().cloned(),
            data_memory: MemoryDump {
                start: start.min(end.min(machine.data().len())),
                end: end.min(machine.data().len()),
                bytes: hex_string(bytes),
            },
        }
    }
}

/// Formats bytes as contiguous lowercase hex.
fn hex_string(bytes: &[u8]) -> String {
    use std::fmt::Write as _;

    bytes.iter().fold(
        String::with_capacity(bytes.len() * 2),
        |mut out, byte| {
            // Writing to a String cannot fail.
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}
