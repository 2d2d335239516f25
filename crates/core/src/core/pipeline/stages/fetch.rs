//! Instruction fetch.

use tracing::debug;

use crate::asm::Program;
use crate::core::pipeline::InFlight;
use crate::stats::SimStats;

/// What a fetch cycle produced.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The fetched instruction, or `None` past the end of the program.
    pub slot: Option<InFlight>,
    /// True when the fetched opcode is a branch or jump. The caller arms a
    /// one-cycle fetch bubble, since the target is unknown until decode.
    pub control_flow: bool,
}

/// Fetches the instruction at `pc`, if any.
///
/// Counts every successful fetch, and branch-class fetches separately for
/// the branch-frequency report.
pub fn fetch(pc: u32, program: &Program, stats: &mut SimStats) -> FetchOutcome {
    let Some(inst) = program.at(pc) else {
        return FetchOutcome {
            slot: None,
            control_flow: false,
        };
    };
    stats.instructions_fetched += 1;
    let control_flow = inst.op.is_control_flow();
    if control_flow {
        stats.branches_fetched += 1;
    }
    debug!(pc, inst = %inst, "fetch");
    FetchOutcome {
        slot: Some(InFlight::new(inst.clone())),
        control_flow,
    }
}
