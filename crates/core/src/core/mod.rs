//! The CPU core.
//!
//! Architectural state and the pipeline model:
//! 1. **Register file:** 32 general-purpose registers plus Hi/Lo, with a hardwired `$zero`.
//! 2. **Data memory:** Sparse word-addressed store.
//! 3. **Pipeline:** The five stage slots, hazard logic, and per-stage transfer functions.
//! 4. **Engine:** The cycle driver tying it all together.

/// The simulation engine and per-cycle snapshots.
pub mod engine;
/// Sparse word-addressed data memory.
pub mod memory;
/// Pipeline slots, in-flight state, hazard detection, and stages.
pub mod pipeline;
/// General-purpose register file with Hi/Lo.
pub mod regfile;

pub use engine::Engine;
pub use memory::Memory;
pub use regfile::RegFile;
