//! Decode Stage Tests.
//!
//! Branch evaluation, the link-register side effect, and the decode-time
//! forwarding paths, driven directly against prepared in-flight records.

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use mipsim_core::core::pipeline::stages::decode::decode;
use mipsim_core::core::pipeline::InFlight;
use mipsim_core::core::regfile::RegFile;
use mipsim_core::isa::{Immediate, Instruction, Opcode};

fn inst(op: Opcode, rs: Option<u8>, rt: Option<u8>, label: Option<&str>) -> InFlight {
    InFlight::new(Instruction {
        op,
        pc: 0,
        rs,
        rt,
        rd: None,
        imm: label.map(|l| Immediate::Label(l.to_string())),
    })
}

fn labels() -> HashMap<String, u32> {
    HashMap::from([("target".to_string(), 24)])
}

// ══════════════════════════════════════════════════════════
// 1. Branch evaluation
// ══════════════════════════════════════════════════════════

#[test]
fn equal_operands_take_beq() {
    let mut regs = RegFile::new();
    regs.write(8, 7);
    regs.write(9, 7);
    let mut slot = inst(Opcode::Beq, Some(8), Some(9), Some("target"));
    let outcome = decode(&mut slot, &mut regs, &labels(), None, None, true);
    assert!(outcome.taken);
    assert_eq!(outcome.target, Some(24));
}

#[test]
fn unequal_operands_fall_through_beq() {
    let mut regs = RegFile::new();
    regs.write(8, 7);
    let mut slot = inst(Opcode::Beq, Some(8), Some(9), Some("target"));
    let outcome = decode(&mut slot, &mut regs, &labels(), None, None, true);
    assert!(!outcome.taken);
    assert_eq!(outcome.target, None);
}

#[test]
fn jump_is_unconditional() {
    let mut regs = RegFile::new();
    let mut slot = inst(Opcode::J, None, None, Some("target"));
    let outcome = decode(&mut slot, &mut regs, &labels(), None, None, true);
    assert!(outcome.taken);
    assert_eq!(outcome.target, Some(24));
}

#[test]
fn jal_writes_link_register_at_decode() {
    let mut regs = RegFile::new();
    let mut slot = inst(Opcode::Jal, None, None, Some("target"));
    slot.inst.pc = 8;
    let outcome = decode(&mut slot, &mut regs, &labels(), None, None, true);
    assert!(outcome.taken);
    assert_eq!(regs.read(31), 12);
}

#[test]
fn jr_targets_register_value_and_flags_refetch() {
    let mut regs = RegFile::new();
    regs.write(31, 16);
    let mut slot = inst(Opcode::Jr, Some(31), None, None);
    let outcome = decode(&mut slot, &mut regs, &labels(), None, None, true);
    assert!(outcome.taken);
    assert!(outcome.is_jr);
    assert_eq!(outcome.target, Some(16));
}

// ══════════════════════════════════════════════════════════
// 2. Decode-time forwarding
// ══════════════════════════════════════════════════════════

fn producer(op: Opcode, dest_rd: u8, result: i32) -> InFlight {
    let mut slot = InFlight::new(Instruction {
        op,
        pc: 0,
        rs: None,
        rt: None,
        rd: Some(dest_rd),
        imm: None,
    });
    slot.result = Some(result);
    slot
}

#[test]
fn operands_forward_from_exiting_execute() {
    let mut regs = RegFile::new();
    let producer = producer(Opcode::Add, 8, 55);
    let mut slot = inst(Opcode::Bne, Some(8), Some(9), Some("target"));
    let outcome = decode(&mut slot, &mut regs, &labels(), Some(&producer), None, true);
    assert_eq!(slot.rs_val, 55);
    assert!(outcome.taken);
}

#[test]
fn loads_do_not_forward_from_exiting_execute() {
    // A load leaving execute still carries its address, not data.
    let mut regs = RegFile::new();
    let mut load = InFlight::new(Instruction {
        op: Opcode::Lw,
        pc: 0,
        rs: Some(29),
        rt: Some(8),
        rd: None,
        imm: Some(Immediate::Value(4)),
    });
    load.result = Some(104);
    let mut slot = inst(Opcode::Beq, Some(8), Some(9), Some("target"));
    decode(&mut slot, &mut regs, &labels(), Some(&load), None, true);
    assert_eq!(slot.rs_val, 0);
}

#[test]
fn exiting_memory_forwards_when_execute_does_not_match() {
    let mut regs = RegFile::new();
    let far = producer(Opcode::Add, 9, 7);
    let mut slot = inst(Opcode::Beq, Some(8), Some(9), Some("target"));
    decode(&mut slot, &mut regs, &labels(), None, Some(&far), true);
    assert_eq!(slot.rt_val, 7);
}

#[test]
fn forwarding_disabled_samples_register_file() {
    let mut regs = RegFile::new();
    regs.write(8, 3);
    let near = producer(Opcode::Add, 8, 55);
    let mut slot = inst(Opcode::Beq, Some(8), Some(9), Some("target"));
    decode(&mut slot, &mut regs, &labels(), Some(&near), None, false);
    assert_eq!(slot.rs_val, 3);
}
