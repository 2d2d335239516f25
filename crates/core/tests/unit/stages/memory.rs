//! Memory Stage Tests.

use pretty_assertions::assert_eq;

use mipsim_core::core::memory::Memory;
use mipsim_core::core::pipeline::stages::memory::access;
use mipsim_core::core::pipeline::InFlight;
use mipsim_core::isa::{Immediate, Instruction, Opcode};

fn slot(op: Opcode, addr: i32, rt_val: i32) -> InFlight {
    let mut slot = InFlight::new(Instruction {
        op,
        pc: 0,
        rs: Some(0),
        rt: Some(8),
        rd: None,
        imm: Some(Immediate::Value(0)),
    });
    slot.result = Some(addr);
    slot.rt_val = rt_val;
    slot
}

#[test]
fn load_replaces_address_with_data() {
    let mut mem = Memory::new();
    mem.store(8, -5);
    let mut slot = slot(Opcode::Lw, 8, 0);
    access(&mut slot, &mut mem);
    assert_eq!(slot.result, Some(-5));
}

#[test]
fn load_of_untouched_address_reads_zero() {
    let mut mem = Memory::new();
    let mut slot = slot(Opcode::Lw, 1024, 0);
    access(&mut slot, &mut mem);
    assert_eq!(slot.result, Some(0));
}

#[test]
fn store_writes_target_value_at_address() {
    let mut mem = Memory::new();
    let mut slot = slot(Opcode::Sw, 12, 99);
    access(&mut slot, &mut mem);
    assert_eq!(mem.load(12), 99);
    // The result slot keeps the address; stores commit nothing later.
    assert_eq!(slot.result, Some(12));
}

#[test]
fn alu_results_pass_through_untouched() {
    let mut mem = Memory::new();
    let mut slot = slot(Opcode::Add, 7, 0);
    access(&mut slot, &mut mem);
    assert_eq!(slot.result, Some(7));
    assert!(mem.is_empty());
}
