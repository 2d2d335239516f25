//! Instruction set definitions.
//!
//! This module models the supported MIPS-like instruction set. It provides:
//! 1. **Opcodes:** A closed enumeration with classification helpers.
//! 2. **Instruction records:** The immutable decoded form produced by the assembler.
//! 3. **ABI names:** The conventional `$zero`..`$ra` register name table.

/// Register ABI name table and parsing.
pub mod abi;
/// Decoded instruction records and immediate operands.
pub mod instruction;
/// The supported opcode set.
pub mod opcode;

pub use instruction::{Immediate, Instruction};
pub use opcode::{DestField, Opcode};
