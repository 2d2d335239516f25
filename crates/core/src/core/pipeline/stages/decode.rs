//! Instruction decode and branch resolution.
//!
//! Decode does three things in order:
//! 1. Samples operand values from the register file.
//! 2. Applies decode-time forwarding from the instructions that just left
//!    execute and memory. The exiting-execute path must be applied before
//!    the branch comparison below; it is the tightest producer-consumer
//!    distance the model supports without a stall.
//! 3. Evaluates branches and jumps, resolving the target program counter.
//!    `jal` writes the link register here, not at writeback.

use std::collections::HashMap;

use tracing::debug;

use crate::core::pipeline::InFlight;
use crate::core::regfile::RegFile;
use crate::isa::abi;
use crate::isa::opcode::Opcode;

/// Branch resolution produced by a decode cycle.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    /// True when a branch condition held or the opcode is an unconditional
    /// jump.
    pub taken: bool,
    /// Resolved target program counter, when taken.
    pub target: Option<u32>,
    /// True for `jr`: the caller must discard the next sequential fetch,
    /// which was issued before the register-indirect target was known.
    pub is_jr: bool,
}

/// Runs the decode stage on the slot occupant.
///
/// `exiting_execute` and `exiting_memory` are the post-advance occupants of
/// the memory and writeback slots: the two instructions whose results became
/// visible this cycle. A load still carries its effective address when it
/// leaves execute, so that source is skipped for loads.
pub fn decode(
    slot: &mut InFlight,
    regs: &mut RegFile,
    labels: &HashMap<String, u32>,
    exiting_execute: Option<&InFlight>,
    exiting_memory: Option<&InFlight>,
    forwarding: bool,
) -> DecodeOutcome {
    slot.rs_val = slot.inst.rs.map_or(0, |r| regs.read(r));
    slot.rt_val = slot.inst.rt.map_or(0, |r| regs.read(r));

    if forwarding {
        if let Some(v) = forwarded_value(slot.inst.rs, exiting_execute, exiting_memory) {
            slot.rs_val = v;
        }
        if let Some(v) = forwarded_value(slot.inst.rt, exiting_execute, exiting_memory) {
            slot.rt_val = v;
        }
    }

    let rs_val = slot.rs_val;
    let rt_val = slot.rt_val;
    let mut outcome = DecodeOutcome::default();

    let taken = match slot.inst.op {
        Opcode::Beq => rs_val == rt_val,
        Opcode::Bne => rs_val != rt_val,
        Opcode::Blt => rs_val < rt_val,
        Opcode::Bgt => rs_val > rt_val,
        Opcode::Ble => rs_val <= rt_val,
        Opcode::Bge => rs_val >= rt_val,
        Opcode::J | Opcode::Jal | Opcode::Jr => true,
        _ => false,
    };
    if !taken {
        return outcome;
    }
    outcome.taken = true;

    match slot.inst.op {
        Opcode::Jal => {
            // Link to the instruction after the jump itself.
            regs.write(abi::LINK_REG, slot.inst.pc.wrapping_add(4) as i32);
            outcome.target = resolve_label(slot, labels);
        }
        Opcode::Jr => {
            outcome.is_jr = true;
            if rs_val != 0 {
                outcome.target = Some(rs_val as u32);
            }
        }
        _ => outcome.target = resolve_label(slot, labels),
    }

    if let Some(target) = outcome.target {
        debug!(pc = slot.inst.pc, target, inst = %slot.inst, "branch taken");
    }
    outcome
}

/// Label targets are validated at engine construction, so a miss here only
/// happens for a malformed hand-built program; it is treated as not taken.
fn resolve_label(slot: &InFlight, labels: &HashMap<String, u32>) -> Option<u32> {
    slot.inst.label().and_then(|l| labels.get(l).copied())
}

/// Decode-time forwarding: nearest producer first.
fn forwarded_value(
    operand: Option<u8>,
    exiting_execute: Option<&InFlight>,
    exiting_memory: Option<&InFlight>,
) -> Option<i32> {
    let reg = operand.filter(|&r| r != 0)?;
    let produces = |slot: &&InFlight| slot.inst.dest() == Some(reg);
    if let Some(producer) = exiting_execute.filter(|s| produces(s)) {
        // Skip loads: their result slot still holds the address here.
        if !producer.inst.op.is_load() {
            return producer.result;
        }
    }
    exiting_memory.filter(|s| produces(s)).and_then(|p| p.result)
}
