//! The supported opcode set.
//!
//! Every stage matches exhaustively on [`Opcode`], so an unsupported
//! instruction is a compile-time hole rather than a silent no-op at run time.

use std::fmt;

use serde::Serialize;

/// Operand field an opcode commits to at writeback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestField {
    /// R-type class: the `rd` field.
    Rd,
    /// I-type / load class: the `rt` field doubles as destination.
    Rt,
}

/// The closed set of supported instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    /// Add two registers.
    Add,
    /// Subtract two registers.
    Sub,
    /// Bitwise AND of two registers.
    And,
    /// Bitwise OR of two registers.
    Or,
    /// Bitwise NOR of two registers.
    Nor,
    /// Set `rd` to 1 if `rs < rt` (signed), else 0.
    Slt,
    /// 64-bit product of `rs * rt` into Hi/Lo.
    Mult,
    /// Quotient of `rs / rt` into Lo, remainder into Hi.
    Div,
    /// Copy Hi into `rd`.
    Mfhi,
    /// Copy Lo into `rd`.
    Mflo,
    /// Add register and immediate.
    Addi,
    /// Bitwise AND of register and immediate.
    Andi,
    /// Bitwise OR of register and immediate.
    Ori,
    /// Set `rt` to 1 if `rs < imm` (signed), else 0.
    Slti,
    /// Shift left logical by the immediate amount.
    Sll,
    /// Shift right logical by the immediate amount.
    Srl,
    /// Shift right arithmetic by the immediate amount.
    Sra,
    /// Load word from memory.
    Lw,
    /// Store word to memory.
    Sw,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than (signed).
    Blt,
    /// Branch if greater than (signed).
    Bgt,
    /// Branch if less than or equal (signed).
    Ble,
    /// Branch if greater than or equal (signed).
    Bge,
    /// Unconditional jump to a label.
    J,
    /// Jump and link: jump to a label, writing the return address to `$ra`.
    Jal,
    /// Jump to the address held in `rs`.
    Jr,
    /// No operation.
    Nop,
}

impl Opcode {
    /// Returns the assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Nor => "nor",
            Self::Slt => "slt",
            Self::Mult => "mult",
            Self::Div => "div",
            Self::Mfhi => "mfhi",
            Self::Mflo => "mflo",
            Self::Addi => "addi",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Slti => "slti",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Lw => "lw",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bgt => "bgt",
            Self::Ble => "ble",
            Self::Bge => "bge",
            Self::J => "j",
            Self::Jal => "jal",
            Self::Jr => "jr",
            Self::Nop => "nop",
        }
    }

    /// Looks up an opcode by mnemonic.
    ///
    /// # Returns
    ///
    /// `None` when the mnemonic is outside the supported set.
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Some(match s {
            "add" => Self::Add,
            "sub" => Self::Sub,
            "and" => Self::And,
            "or" => Self::Or,
            "nor" => Self::Nor,
            "slt" => Self::Slt,
            "mult" => Self::Mult,
            "div" => Self::Div,
            "mfhi" => Self::Mfhi,
            "mflo" => Self::Mflo,
            "addi" => Self::Addi,
            "andi" => Self::Andi,
            "ori" => Self::Ori,
            "slti" => Self::Slti,
            "sll" => Self::Sll,
            "srl" => Self::Srl,
            "sra" => Self::Sra,
            "lw" => Self::Lw,
            "sw" => Self::Sw,
            "beq" => Self::Beq,
            "bne" => Self::Bne,
            "blt" => Self::Blt,
            "bgt" => Self::Bgt,
            "ble" => Self::Ble,
            "bge" => Self::Bge,
            "j" => Self::J,
            "jal" => Self::Jal,
            "jr" => Self::Jr,
            "nop" => Self::Nop,
            _ => return None,
        })
    }

    /// Which operand field this opcode writes at writeback, if any.
    ///
    /// Hi/Lo writes by `mult`/`div` happen in execute and are not covered
    /// here; `div` carries no `rd` operand and therefore commits nothing.
    pub fn dest_field(self) -> Option<DestField> {
        match self {
            Self::Add
            | Self::Sub
            | Self::And
            | Self::Or
            | Self::Nor
            | Self::Slt
            | Self::Mult
            | Self::Div
            | Self::Mfhi
            | Self::Mflo => Some(DestField::Rd),
            Self::Addi
            | Self::Andi
            | Self::Ori
            | Self::Slti
            | Self::Sll
            | Self::Srl
            | Self::Sra
            | Self::Lw => Some(DestField::Rt),
            Self::Sw
            | Self::Beq
            | Self::Bne
            | Self::Blt
            | Self::Bgt
            | Self::Ble
            | Self::Bge
            | Self::J
            | Self::Jal
            | Self::Jr
            | Self::Nop => None,
        }
    }

    /// True for branches and jumps. Fetching one of these arms a one-cycle
    /// fetch bubble, since the target is not known until decode completes.
    pub fn is_control_flow(self) -> bool {
        matches!(
            self,
            Self::Beq
                | Self::Bne
                | Self::Blt
                | Self::Bgt
                | Self::Ble
                | Self::Bge
                | Self::J
                | Self::Jal
                | Self::Jr
        )
    }

    /// True when the immediate operand holds a label rather than a value.
    pub fn uses_label(self) -> bool {
        matches!(
            self,
            Self::Beq
                | Self::Bne
                | Self::Blt
                | Self::Bgt
                | Self::Ble
                | Self::Bge
                | Self::J
                | Self::Jal
        )
    }

    /// True for the memory-read opcode.
    pub fn is_load(self) -> bool {
        self == Self::Lw
    }

    /// True for the memory-write opcode.
    pub fn is_store(self) -> bool {
        self == Self::Sw
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
