//! Common types and constants shared across the virtual machine.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Constants:** Memory sizes, word geometry, and the execution cap.
//! 2. **Error Handling:** Typed errors for encoding, decoding, assembly, and
//!    program loading.

/// System-wide constants (memory sizes, word geometry, execution cap).
pub mod constants;

/// Error types for encoding, decoding, assembly, and loading.
pub mod error;

pub use constants::{CODE_MEMORY_SIZE, DATA_MEMORY_SIZE, INSTRUCTION_CAP, WORD_BYTES};
pub use error::{AssembleError, DecodeError, EncodeError, LoadError};
