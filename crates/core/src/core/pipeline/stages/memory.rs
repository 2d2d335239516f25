//! Data memory access.

use tracing::debug;

use crate::core::memory::Memory;
use crate::core::pipeline::InFlight;

/// Runs the memory stage on the slot occupant.
///
/// For `lw` the effective address computed in execute is replaced by the
/// loaded word; for `sw` the (possibly forwarded) target-register value is
/// stored at it. Everything else passes through untouched.
pub fn access(slot: &mut InFlight, mem: &mut Memory) {
    let op = slot.inst.op;
    if op.is_load() {
        let addr = slot.result.unwrap_or(0) as u32;
        let value = mem.load(addr);
        debug!(addr, value, "load");
        slot.result = Some(value);
    } else if op.is_store() {
        let addr = slot.result.unwrap_or(0) as u32;
        debug!(addr, value = slot.rt_val, "store");
        mem.store(addr, slot.rt_val);
    }
}
