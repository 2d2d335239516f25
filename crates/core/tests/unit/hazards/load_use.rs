//! Load-Use Hazard Tests.
//!
//! A load's value does not exist until its memory stage has run, so a
//! dependent instruction must be held in decode while the load occupies
//! execute or memory. These tests pin the stall counts for each producer
//! distance and verify an address is never delivered in place of data.

use pretty_assertions::assert_eq;

use crate::common::harness::{run_program, TestContext};

// ══════════════════════════════════════════════════════════
// 1. Stall counts by distance
// ══════════════════════════════════════════════════════════

#[test]
fn adjacent_dependent_stalls_twice() {
    let mut ctx = TestContext::new(
        "
        lw $t1, 8($zero)
        add $t2, $t1, $t1
        ",
    );
    ctx.engine.mem.store(8, 5);
    let engine = ctx.run();
    assert_eq!(engine.stats.stalls_data, 2);
    assert_eq!(engine.stats.cycles, 2 + 4 + 2);
    assert_eq!(engine.regs.read(10), 10);
}

#[test]
fn one_gap_dependent_stalls_once() {
    let mut ctx = TestContext::new(
        "
        lw $t1, 8($zero)
        addi $t4, $zero, 1
        add $t2, $t1, $t1
        ",
    );
    ctx.engine.mem.store(8, 5);
    let engine = ctx.run();
    assert_eq!(engine.stats.stalls_data, 1);
    assert_eq!(engine.stats.cycles, 3 + 4 + 1);
    assert_eq!(engine.regs.read(10), 10);
}

#[test]
fn two_gap_dependent_needs_no_stall() {
    let mut ctx = TestContext::new(
        "
        lw $t1, 8($zero)
        addi $t4, $zero, 1
        addi $t5, $zero, 2
        add $t2, $t1, $t1
        ",
    );
    ctx.engine.mem.store(8, 5);
    let engine = ctx.run();
    assert_eq!(engine.stats.stalls_data, 0);
    assert_eq!(engine.stats.cycles, 4 + 4);
    assert_eq!(engine.regs.read(10), 10);
}

#[test]
fn independent_follower_never_stalls() {
    let engine = run_program(
        "
        lw $t1, 8($zero)
        add $t2, $t3, $t4
        ",
    );
    assert_eq!(engine.stats.stalls_data, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Value, not address
// ══════════════════════════════════════════════════════════

#[test]
fn dependent_sees_loaded_value_not_address() {
    // Address (8) and stored value (5) differ, so a wrong forwarding path
    // that leaks the effective address is observable.
    let mut ctx = TestContext::new(
        "
        lw $t1, 8($zero)
        add $t2, $t1, $zero
        ",
    );
    ctx.engine.mem.store(8, 5);
    let engine = ctx.run();
    assert_eq!(engine.regs.read(10), 5);
}

#[test]
fn store_after_load_of_same_register_stalls() {
    // sw reads $t1 as its data operand, so it is a load consumer too.
    let mut ctx = TestContext::new(
        "
        lw $t1, 8($zero)
        sw $t1, 12($zero)
        ",
    );
    ctx.engine.mem.store(8, 99);
    let engine = ctx.run();
    assert_eq!(engine.stats.stalls_data, 2);
    assert_eq!(engine.mem.load(12), 99);
}
