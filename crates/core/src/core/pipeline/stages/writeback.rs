//! Register-file commit.

use tracing::debug;

use crate::core::pipeline::InFlight;
use crate::core::regfile::RegFile;
use crate::isa::abi;
use crate::stats::SimStats;

/// Retires the slot occupant, committing its result if it has a
/// destination.
///
/// The only place an ALU or load result reaches the architectural register
/// file. Instructions without a destination (stores, branches, `nop`, a
/// shift flagged invalid) retire without writing.
pub fn commit(slot: &InFlight, regs: &mut RegFile, stats: &mut SimStats) {
    stats.instructions_retired += 1;
    if let (Some(dest), Some(result)) = (slot.inst.dest(), slot.result) {
        regs.write(dest, result);
        debug!(reg = %abi::name(dest), value = result, inst = %slot.inst, "writeback");
    }
}
