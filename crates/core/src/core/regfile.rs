//! The register file.
//!
//! 32 general-purpose registers of two's-complement `i32`, plus the Hi/Lo
//! pair written by `mult` and `div`. `$zero` is hardwired: writes to index 0
//! are silently discarded.

use serde::Serialize;

use crate::isa::abi;

/// General-purpose register file with the Hi/Lo multiply/divide pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegFile {
    regs: [i32; 32],
    /// High word of `mult`, remainder of `div`.
    pub hi: i32,
    /// Low word of `mult`, quotient of `div`.
    pub lo: i32,
}

impl RegFile {
    /// Creates a register file with all registers zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register. Out-of-range indices read as 0.
    pub fn read(&self, idx: u8) -> i32 {
        self.regs.get(idx as usize).copied().unwrap_or(0)
    }

    /// Writes a register. Writes to `$zero` and out-of-range indices are
    /// discarded.
    pub fn write(&mut self, idx: u8, value: i32) {
        if idx == 0 {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx as usize) {
            *slot = value;
        }
    }

    /// Iterates the non-zero registers as `(name, value)` pairs, in index
    /// order. Used by state dumps.
    pub fn nonzero(&self) -> impl Iterator<Item = (String, i32)> + '_ {
        self.regs
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| (abi::name(i as u8), v))
    }
}
