//! Decoded instruction records.
//!
//! The immutable form produced by the assembler. Operand fields never change
//! after assembly; all per-cycle execution state lives in
//! [`crate::core::pipeline::InFlight`] instead.

use std::fmt;

use serde::Serialize;

use crate::isa::abi;
use crate::isa::opcode::{DestField, Opcode};

/// Immediate operand of a decoded instruction.
///
/// Branch and jump targets stay symbolic until branch evaluation resolves
/// them against the program's label map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Immediate {
    /// A numeric immediate (arithmetic, shift amount, load/store offset).
    Value(i32),
    /// An unresolved branch/jump target label.
    Label(String),
}

/// One decoded instruction.
///
/// `pc` is the byte offset of the instruction (instruction index × 4), used
/// for display, the `jal` link address, and branch reporting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// The opcode.
    pub op: Opcode,
    /// Program counter of this instruction.
    pub pc: u32,
    /// Source register index, when the opcode has one.
    pub rs: Option<u8>,
    /// Target register index, when the opcode has one.
    pub rt: Option<u8>,
    /// Destination register index, when the opcode has one.
    pub rd: Option<u8>,
    /// Immediate operand, when the opcode has one.
    pub imm: Option<Immediate>,
}

impl Instruction {
    /// The register this instruction commits at writeback, if any.
    ///
    /// Resolves the opcode's destination class against the operand fields:
    /// R-type class reads `rd`, the I-type/load class reads `rt`.
    pub fn dest(&self) -> Option<u8> {
        match self.op.dest_field() {
            Some(DestField::Rd) => self.rd,
            Some(DestField::Rt) => self.rt,
            None => None,
        }
    }

    /// Numeric immediate value, or 0 when absent or symbolic.
    pub fn imm_value(&self) -> i32 {
        match &self.imm {
            Some(Immediate::Value(v)) => *v,
            _ => 0,
        }
    }

    /// Unresolved target label, when the immediate is symbolic.
    pub fn label(&self) -> Option<&str> {
        match &self.imm {
            Some(Immediate::Label(l)) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = |r: Option<u8>| r.map_or_else(|| "$?".to_string(), abi::name);
        match self.op {
            Opcode::Nop => write!(f, "nop"),
            Opcode::Mfhi | Opcode::Mflo => write!(f, "{} {}", self.op, reg(self.rd)),
            Opcode::Jr => write!(f, "jr {}", reg(self.rs)),
            Opcode::J | Opcode::Jal => {
                write!(f, "{} {}", self.op, self.label().unwrap_or("?"))
            }
            Opcode::Div => write!(f, "div {}, {}", reg(self.rs), reg(self.rt)),
            Opcode::Lw | Opcode::Sw => write!(
                f,
                "{} {}, {}({})",
                self.op,
                reg(self.rt),
                self.imm_value(),
                reg(self.rs)
            ),
            Opcode::Beq | Opcode::Bne | Opcode::Blt | Opcode::Bgt | Opcode::Ble | Opcode::Bge => {
                write!(
                    f,
                    "{} {}, {}, {}",
                    self.op,
                    reg(self.rs),
                    reg(self.rt),
                    self.label().unwrap_or("?")
                )
            }
            Opcode::Addi
            | Opcode::Andi
            | Opcode::Ori
            | Opcode::Slti
            | Opcode::Sll
            | Opcode::Srl
            | Opcode::Sra => write!(
                f,
                "{} {}, {}, {}",
                self.op,
                reg(self.rt),
                reg(self.rs),
                self.imm_value()
            ),
            Opcode::Add
            | Opcode::Sub
            | Opcode::And
            | Opcode::Or
            | Opcode::Nor
            | Opcode::Slt
            | Opcode::Mult => write!(
                f,
                "{} {}, {}, {}",
                self.op,
                reg(self.rd),
                reg(self.rs),
                reg(self.rt)
            ),
        }
    }
}
