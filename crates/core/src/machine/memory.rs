//! Linear Byte Memory.
//!
//! A fixed-size, zero-initialized byte array with word-granular access. A
//! word is a 24-bit value stored as 3 consecutive little-endian bytes at a
//! base address. Word accesses honor the partial-word boundary policy: any of
//! the three byte positions that falls outside the array bound is silently
//! skipped — the corresponding byte of the value is simply not read or not
//! written. This is boundary behavior, not an error condition.

use crate::common::constants::{WORD_BYTES, WORD_MASK};
use crate::common::error::LoadError;

/// A fixed-size linear byte memory.
///
/// Allocated once, zero-initialized, and owned by a single machine instance
/// for its whole run; there is no reset operation.
#[derive(Clone, Debug)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Creates a zero-initialized memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the memory size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the memory has zero capacity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the full contents as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copies `image` verbatim to the start of memory.
    ///
    /// # Errors
    ///
    /// [`LoadError::TooLarge`] if the image exceeds capacity; memory is left
    /// untouched.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), LoadError> {
        if image.len() > self.bytes.len() {
            return Err(LoadError::TooLarge {
                size: image.len(),
                capacity: self.bytes.len(),
            });
        }
        self.bytes[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Reads the 24-bit word at `addr`.
    ///
    /// Byte positions past the end of memory contribute nothing to the value
    /// (partial-word policy); a read entirely out of bounds yields 0.
    pub fn read_word(&self, addr: u32) -> u32 {
        let base = addr as usize;
        let mut value = 0;
        for i in 0..WORD_BYTES {
            if let Some(&byte) = self.bytes.get(base + i) {
                value |= u32::from(byte) << (8 * i);
            }
        }
        value
    }

    /// Writes `value` as a 24-bit word at `addr`.
    ///
    /// Byte positions past the end of memory are skipped (partial-word
    /// policy); a write entirely out of bounds touches nothing.
    pub fn write_word(&mut self, addr: u32, value: u32) {
        let base = addr as usize;
        let value = value & WORD_MASK;
        for i in 0..WORD_BYTES {
            if let Some(byte) = self.bytes.get_mut(base + i) {
                *byte = (value >> (8 * i)) as u8;
            }
        }
    }

    /// Returns the bytes in `[start, end)`, clamping both bounds to the
    /// memory size.
    pub fn dump_range(&self, start: usize, end: usize) -> &[u8] {
        let end = end.min(self.bytes.len());
        let start = start.min(end);
        &self.bytes[start..end]
    }
}
