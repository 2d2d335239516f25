//! Per-stage transfer functions.
//!
//! Each stage is a free function over the in-flight record plus the state it
//! is allowed to touch. The engine owns the ordering; nothing here advances
//! a slot.

/// Instruction decode and branch resolution.
pub mod decode;
/// Opcode evaluation and effective-address computation.
pub mod execute;
/// Instruction fetch.
pub mod fetch;
/// Data memory access.
pub mod memory;
/// Register-file commit.
pub mod writeback;
