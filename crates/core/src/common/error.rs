//! Fatal simulation errors.
//!
//! Conditions that stop the engine. Non-fatal conditions (divide by zero,
//! negative shift operands) are counted in [`crate::stats::SimStats`] and
//! reported through `tracing` instead; they never surface here.

use thiserror::Error;

/// Errors that abort a simulation.
///
/// Both variants leave the engine intact so a caller can still render the
/// last known pipeline, register, and memory state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A branch or jump references a label the program never defines.
    ///
    /// Detected when the engine is constructed, before the first cycle runs.
    #[error("undefined label `{label}` referenced by the instruction at pc {pc:#010x}")]
    UndefinedLabel {
        /// The unresolved label text.
        label: String,
        /// Program counter of the referencing instruction.
        pc: u32,
    },

    /// The cycle safety limit was reached before the pipeline drained.
    ///
    /// This is a safety net, not a normal termination path: it usually means
    /// the program branches in an infinite loop or jumps outside the
    /// instruction store.
    #[error("cycle safety limit of {limit} cycles exceeded at pc {pc:#010x} (likely an infinite loop)")]
    CycleLimitExceeded {
        /// The configured limit that was hit.
        limit: u64,
        /// Program counter at the time the limit fired.
        pc: u32,
    },
}
