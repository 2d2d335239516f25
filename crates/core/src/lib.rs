//! Cycle-level simulator for a classic 5-stage MIPS pipeline.
//!
//! This crate implements a pedagogical, cycle-accurate model of the textbook
//! fetch/decode/execute/memory/writeback datapath:
//! 1. **ISA:** A closed MIPS-like opcode set (ALU, Hi/Lo multiply/divide, shifts, word load/store, branches and jumps).
//! 2. **Assembler:** Source text to decoded instruction records plus a label map.
//! 3. **Pipeline:** Five slots advanced in reverse order each cycle, with load-use hazard detection, operand forwarding, and branch flush timing.
//! 4. **Simulation:** Engine-owned performance counters and read-only per-cycle snapshots for trace rendering.

/// Textual assembler producing decoded programs.
pub mod asm;
/// Common error types.
pub mod common;
/// Simulator configuration (defaults, JSON deserialization).
pub mod config;
/// CPU core (pipeline engine, register file, data memory).
pub mod core;
/// Instruction set (opcodes, instruction records, register ABI names).
pub mod isa;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Assembles source text into a [`Program`].
pub use crate::asm::assemble;
/// Decoded instruction sequence plus label map; input to the engine.
pub use crate::asm::Program;
/// Fatal simulation errors (unresolved labels, cycle safety limit).
pub use crate::common::error::SimError;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The pipeline engine; owns all architectural and pipeline state.
pub use crate::core::engine::Engine;
/// Engine-owned performance counters and the derived CPI/branch report.
pub use crate::stats::SimStats;
