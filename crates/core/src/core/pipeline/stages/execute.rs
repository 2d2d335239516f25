//! Opcode evaluation.
//!
//! Applies the forwarding decision made at the top of the cycle, then
//! computes the opcode-specific result. Two quirks are preserved from the
//! modeled machine and reported rather than raised:
//! 1. Division by zero zeroes Hi, Lo, and the result and continues.
//! 2. A shift whose value operand is negative is counted as invalid and
//!    produces no result at all.
//!
//! Hi/Lo writes happen here immediately; only ordinary register results are
//! deferred to writeback.

use tracing::warn;

use crate::core::pipeline::hazards::Forward;
use crate::core::pipeline::InFlight;
use crate::core::regfile::RegFile;
use crate::isa::opcode::Opcode;
use crate::stats::SimStats;

/// Runs the execute stage on the slot occupant.
///
/// `near` is the result of the instruction that just completed its memory
/// stage, `far` the result of the instruction that just retired; which one
/// an operand takes (if either) was fixed by the forwarding tags before the
/// slots advanced. Forwarded values are written back into the slot so the
/// memory stage stores the forwarded value for `sw`, not the stale sample.
pub fn execute(
    slot: &mut InFlight,
    regs: &mut RegFile,
    near: Option<i32>,
    far: Option<i32>,
    forwarding: bool,
    stats: &mut SimStats,
) {
    if forwarding {
        if let Some(v) = pick(slot.fwd_rs, near, far) {
            slot.rs_val = v;
        }
        if let Some(v) = pick(slot.fwd_rt, near, far) {
            slot.rt_val = v;
        }
    }

    let rs_val = slot.rs_val;
    let rt_val = slot.rt_val;
    let imm = slot.inst.imm_value();

    slot.result = match slot.inst.op {
        Opcode::Add => Some(rs_val.wrapping_add(rt_val)),
        Opcode::Sub => Some(rs_val.wrapping_sub(rt_val)),
        Opcode::And => Some(rs_val & rt_val),
        Opcode::Or => Some(rs_val | rt_val),
        Opcode::Nor => Some(!(rs_val | rt_val)),
        Opcode::Slt => Some(i32::from(rs_val < rt_val)),
        Opcode::Addi => Some(rs_val.wrapping_add(imm)),
        Opcode::Andi => Some(rs_val & imm),
        Opcode::Ori => Some(rs_val | imm),
        Opcode::Slti => Some(i32::from(rs_val < imm)),
        Opcode::Mult => {
            let product = i64::from(rs_val) * i64::from(rt_val);
            regs.lo = product as i32;
            regs.hi = (product >> 32) as i32;
            Some(regs.lo)
        }
        Opcode::Div => {
            if rt_val == 0 {
                stats.div_by_zero += 1;
                warn!(
                    pc = slot.inst.pc,
                    "division by zero; Hi/Lo and result defined as zero"
                );
                regs.lo = 0;
                regs.hi = 0;
                Some(0)
            } else {
                regs.lo = rs_val.wrapping_div(rt_val);
                regs.hi = rs_val.wrapping_rem(rt_val);
                Some(regs.lo)
            }
        }
        Opcode::Mfhi => Some(regs.hi),
        Opcode::Mflo => Some(regs.lo),
        Opcode::Sll | Opcode::Srl | Opcode::Sra => shift(slot, rs_val, imm, stats),
        // Effective address; the memory stage turns it into data for `lw`.
        Opcode::Lw | Opcode::Sw => Some(rs_val.wrapping_add(imm)),
        Opcode::Beq
        | Opcode::Bne
        | Opcode::Blt
        | Opcode::Bgt
        | Opcode::Ble
        | Opcode::Bge
        | Opcode::J
        | Opcode::Jal
        | Opcode::Jr
        | Opcode::Nop => None,
    };
}

fn pick(tag: Forward, near: Option<i32>, far: Option<i32>) -> Option<i32> {
    match tag {
        Forward::None => None,
        Forward::FromExMem => near,
        Forward::FromMemWb => far,
    }
}

/// Shift amounts are taken modulo 32. A negative value operand is the
/// documented invalid case: counted, reported, and not executed.
fn shift(slot: &InFlight, rs_val: i32, imm: i32, stats: &mut SimStats) -> Option<i32> {
    if rs_val < 0 {
        stats.invalid_shifts += 1;
        warn!(
            pc = slot.inst.pc,
            value = rs_val,
            "negative shift value operand; instruction not executed"
        );
        return None;
    }
    let amount = (imm as u32) & 31;
    Some(match slot.inst.op {
        Opcode::Sll => rs_val.wrapping_shl(amount),
        Opcode::Srl => ((rs_val as u32) >> amount) as i32,
        _ => rs_val >> amount,
    })
}
