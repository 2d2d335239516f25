//! Writeback Stage Tests.

use pretty_assertions::assert_eq;

use mipsim_core::core::pipeline::stages::writeback::commit;
use mipsim_core::core::pipeline::InFlight;
use mipsim_core::core::regfile::RegFile;
use mipsim_core::isa::{Instruction, Opcode};
use mipsim_core::stats::SimStats;

fn slot(op: Opcode, rt: Option<u8>, rd: Option<u8>, result: Option<i32>) -> InFlight {
    let mut slot = InFlight::new(Instruction {
        op,
        pc: 0,
        rs: None,
        rt,
        rd,
        imm: None,
    });
    slot.result = result;
    slot
}

#[test]
fn r_type_commits_to_rd() {
    let mut regs = RegFile::new();
    let mut stats = SimStats::default();
    commit(&slot(Opcode::Add, None, Some(10), Some(42)), &mut regs, &mut stats);
    assert_eq!(regs.read(10), 42);
    assert_eq!(stats.instructions_retired, 1);
}

#[test]
fn i_type_commits_to_rt() {
    let mut regs = RegFile::new();
    let mut stats = SimStats::default();
    commit(&slot(Opcode::Lw, Some(9), None, Some(7)), &mut regs, &mut stats);
    assert_eq!(regs.read(9), 7);
}

#[test]
fn store_retires_without_writing() {
    let mut regs = RegFile::new();
    let mut stats = SimStats::default();
    commit(&slot(Opcode::Sw, Some(9), None, Some(12)), &mut regs, &mut stats);
    assert_eq!(regs.read(9), 0);
    assert_eq!(stats.instructions_retired, 1);
}

#[test]
fn missing_result_commits_nothing() {
    // An invalid shift retires with an empty result slot.
    let mut regs = RegFile::new();
    regs.write(9, 5);
    let mut stats = SimStats::default();
    commit(&slot(Opcode::Sll, Some(9), None, None), &mut regs, &mut stats);
    assert_eq!(regs.read(9), 5);
    assert_eq!(stats.instructions_retired, 1);
}

#[test]
fn zero_register_write_is_discarded() {
    let mut regs = RegFile::new();
    let mut stats = SimStats::default();
    commit(&slot(Opcode::Addi, Some(0), None, Some(9)), &mut regs, &mut stats);
    assert_eq!(regs.read(0), 0);
}
