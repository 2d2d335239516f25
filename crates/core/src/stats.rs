//! Simulation statistics.
//!
//! All counters are owned by the engine and incremented at well-defined
//! points in the cycle:
//! 1. **Throughput:** cycles, fetched and retired instruction counts.
//! 2. **Control flow:** branches fetched vs. actually taken.
//! 3. **Hazards:** data (load-use) and control (fetch bubble) stall cycles.
//! 4. **Anomalies:** divides by zero and invalid shift operands.

use std::fmt;

use serde::Serialize;

/// Performance counters for one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions that left the fetch stage.
    pub instructions_fetched: u64,
    /// Instructions that completed writeback.
    pub instructions_retired: u64,
    /// Branch and jump instructions fetched.
    pub branches_fetched: u64,
    /// Branches whose condition held (jumps always count).
    pub branches_taken: u64,
    /// Cycles lost to load-use stalls.
    pub stalls_data: u64,
    /// Cycles lost to control-flow fetch bubbles.
    pub stalls_control: u64,
    /// Divide instructions whose divisor was zero.
    pub div_by_zero: u64,
    /// Shift instructions with a negative shift-value operand.
    pub invalid_shifts: u64,
}

impl SimStats {
    /// Cycles per retired instruction, or 0 when nothing retired.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Fraction of fetched instructions that were branches or jumps,
    /// or 0 when nothing was fetched.
    pub fn branch_frequency(&self) -> f64 {
        if self.instructions_fetched == 0 {
            0.0
        } else {
            self.branches_fetched as f64 / self.instructions_fetched as f64
        }
    }

    /// Total stall cycles of both kinds.
    pub fn stalls(&self) -> u64 {
        self.stalls_data + self.stalls_control
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cycles:               {}", self.cycles)?;
        writeln!(f, "instructions fetched: {}", self.instructions_fetched)?;
        writeln!(f, "instructions retired: {}", self.instructions_retired)?;
        writeln!(f, "cpi:                  {:.3}", self.cpi())?;
        writeln!(
            f,
            "branches:             {} fetched, {} taken ({:.1}% of fetch)",
            self.branches_fetched,
            self.branches_taken,
            self.branch_frequency() * 100.0
        )?;
        writeln!(
            f,
            "stall cycles:         {} ({} data, {} control)",
            self.stalls(),
            self.stalls_data,
            self.stalls_control
        )?;
        if self.div_by_zero > 0 {
            writeln!(f, "divides by zero:      {}", self.div_by_zero)?;
        }
        if self.invalid_shifts > 0 {
            writeln!(f, "invalid shifts:       {}", self.invalid_shifts)?;
        }
        Ok(())
    }
}
