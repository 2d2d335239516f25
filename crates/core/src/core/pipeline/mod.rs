//! Pipeline state.
//!
//! The five stage slots and the per-instruction in-flight record:
//! 1. **Slots:** Each stage holds at most one [`InFlight`]; `None` is a bubble.
//! 2. **Ownership:** Instructions move between slots by value. No two stages
//!    ever hold the same instruction, so there is no shared mutable state to
//!    coordinate.
//! 3. **Hazards:** Forwarding selection and the load-use stall check live in
//!    [`hazards`]; the per-stage transfer functions live in [`stages`].

/// Forwarding selection and load-use stall detection.
pub mod hazards;
/// The five per-stage transfer functions.
pub mod stages;

use serde::Serialize;

use crate::isa::Instruction;
use hazards::Forward;

/// An instruction occupying a pipeline slot, with its runtime state.
///
/// Operand values are sampled at decode and may be overwritten by
/// forwarding. `result` starts empty and is filled by execute (ALU value or
/// effective address) and, for loads, replaced by the memory stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InFlight {
    /// The decoded instruction. Operand fields are never mutated.
    pub inst: Instruction,
    /// Sampled (possibly forwarded) source register value.
    pub rs_val: i32,
    /// Sampled (possibly forwarded) target register value.
    pub rt_val: i32,
    /// Computed result, once execute (and for loads, memory) has run.
    pub result: Option<i32>,
    /// Forwarding source chosen for the source operand this cycle.
    pub fwd_rs: Forward,
    /// Forwarding source chosen for the target operand this cycle.
    pub fwd_rt: Forward,
}

impl InFlight {
    /// Wraps a freshly fetched instruction with zeroed runtime state.
    pub fn new(inst: Instruction) -> Self {
        Self {
            inst,
            rs_val: 0,
            rt_val: 0,
            result: None,
            fwd_rs: Forward::None,
            fwd_rt: Forward::None,
        }
    }
}

/// The five stage slots. `None` is a bubble.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    /// Instruction fetched this cycle.
    pub fetch: Option<InFlight>,
    /// Instruction being decoded.
    pub decode: Option<InFlight>,
    /// Instruction about to execute.
    pub execute: Option<InFlight>,
    /// Instruction in its memory-access cycle.
    pub memory: Option<InFlight>,
    /// Instruction about to commit.
    pub writeback: Option<InFlight>,
}

impl Pipeline {
    /// True when every slot is a bubble. Together with an exhausted program
    /// counter this is the termination condition.
    pub fn is_empty(&self) -> bool {
        self.fetch.is_none()
            && self.decode.is_none()
            && self.execute.is_none()
            && self.memory.is_none()
            && self.writeback.is_none()
    }
}
