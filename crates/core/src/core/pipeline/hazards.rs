//! Hazard detection and forwarding selection.
//!
//! Pure functions evaluated once per cycle against the pre-advance slot
//! occupants, before any slot is overwritten:
//! 1. **Forwarding:** Per operand, pick the nearest in-flight producer of
//!    that register. The producer closer to execute always wins over the
//!    farther one; reversing that tie-break delivers stale values.
//! 2. **Load-use stall:** A load's result does not exist until its memory
//!    stage has run, so a dependent instruction must be held in decode while
//!    the load occupies execute *or* memory. Forwarding from a load still in
//!    execute would deliver the effective address instead of the data.

use serde::Serialize;

use super::InFlight;

/// Forwarding source chosen for one operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Forward {
    /// Read the architectural register file.
    #[default]
    None,
    /// Take the result of the instruction leaving the memory slot.
    FromExMem,
    /// Take the result of the instruction leaving the writeback slot.
    FromMemWb,
}

/// Does this in-flight instruction produce a forwardable register value?
///
/// Writes to `$zero` never forward.
fn writes_reg(slot: &InFlight) -> Option<u8> {
    slot.inst.dest().filter(|&d| d != 0)
}

/// Picks the forwarding source for one operand register.
///
/// `near` is the instruction about to move MEM -> WB, `far` the one about to
/// retire. The nearer producer shadows the farther one.
pub fn forward_select(
    near: Option<&InFlight>,
    far: Option<&InFlight>,
    operand: Option<u8>,
) -> Forward {
    let Some(reg) = operand.filter(|&r| r != 0) else {
        return Forward::None;
    };
    if near.and_then(writes_reg) == Some(reg) {
        return Forward::FromExMem;
    }
    if far.and_then(writes_reg) == Some(reg) {
        return Forward::FromMemWb;
    }
    Forward::None
}

/// True when the instruction in decode depends on an in-flight load.
///
/// Checked against both the execute- and memory-resident occupants: the
/// load's value becomes safe to consume only after its memory stage has
/// completed and the value has been committed.
pub fn load_use_stall(
    ex: Option<&InFlight>,
    mem: Option<&InFlight>,
    decoding: Option<&InFlight>,
) -> bool {
    let Some(consumer) = decoding else {
        return false;
    };
    let depends_on = |producer: Option<&InFlight>| {
        producer.is_some_and(|p| {
            p.inst.op.is_load()
                && writes_reg(p).is_some_and(|d| {
                    consumer.inst.rs == Some(d) || consumer.inst.rt == Some(d)
                })
        })
    };
    depends_on(ex) || depends_on(mem)
}
