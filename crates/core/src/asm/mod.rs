//! Textual assembler.
//!
//! Turns source lines into the decoded form the engine consumes. It performs:
//! 1. **Label collection:** `name:` maps to the program counter of the next instruction; a label may share a line with an instruction.
//! 2. **Operand decoding:** Per-opcode operand forms, with `$t0`/`$8` register tokens and decimal or `0x` immediates.
//! 3. **Validation:** Unknown opcodes, registers, and malformed operands are decode-time fatal errors.
//!
//! Branch and jump targets are left symbolic; the engine resolves them
//! against the label map (and rejects undefined labels before the first
//! cycle runs).

use std::collections::HashMap;

use thiserror::Error;

use crate::isa::abi;
use crate::isa::instruction::{Immediate, Instruction};
use crate::isa::opcode::Opcode;

/// Assembly-time errors. All are fatal: no partial program is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    /// Mnemonic outside the supported opcode set.
    #[error("line {line}: unknown opcode `{mnemonic}`")]
    UnknownOpcode {
        /// 1-based source line.
        line: usize,
        /// The offending mnemonic.
        mnemonic: String,
    },

    /// Token that is not a valid register reference.
    #[error("line {line}: unknown register `{token}`")]
    UnknownRegister {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// Immediate that does not parse as decimal or `0x` hex.
    #[error("line {line}: bad immediate `{token}`")]
    BadImmediate {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// Wrong operand count or shape for the opcode.
    #[error("line {line}: `{mnemonic}` expects {expected}")]
    BadOperands {
        /// 1-based source line.
        line: usize,
        /// The mnemonic being decoded.
        mnemonic: String,
        /// Human-readable expected form.
        expected: &'static str,
    },

    /// Memory operand that is not of the form `offset($base)`.
    #[error("line {line}: malformed memory operand `{token}` (expected `offset($base)`)")]
    BadMemoryOperand {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A label defined more than once.
    #[error("line {line}: duplicate label `{label}`")]
    DuplicateLabel {
        /// 1-based source line.
        line: usize,
        /// The label text.
        label: String,
    },
}

/// An assembled program: the ordered instruction store plus the label map.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Instructions indexed by `pc / 4`.
    pub instructions: Vec<Instruction>,
    /// Label name to program counter of the first instruction after it.
    pub labels: HashMap<String, u32>,
}

impl Program {
    /// Instruction at the given program counter, when in range.
    pub fn at(&self, pc: u32) -> Option<&Instruction> {
        self.instructions.get((pc / 4) as usize)
    }

    /// First program counter past the instruction store.
    pub fn end_pc(&self) -> u32 {
        (self.instructions.len() as u32) * 4
    }
}

/// Assembles source text into a [`Program`].
///
/// Blank lines and `#` comments are skipped. Labels may stand alone or
/// prefix an instruction on the same line.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered, with its 1-based line number.
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    let mut program = Program::default();
    let mut pc: u32 = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let mut line = raw;
        if let Some((code, _comment)) = line.split_once('#') {
            line = code;
        }
        let mut line = line.trim();

        if let Some((label, rest)) = line.split_once(':') {
            let label = label.trim();
            if program.labels.insert(label.to_string(), pc).is_some() {
                return Err(AsmError::DuplicateLabel {
                    line: line_no,
                    label: label.to_string(),
                });
            }
            line = rest.trim();
        }
        if line.is_empty() {
            continue;
        }

        let inst = parse_instruction(line, pc, line_no)?;
        program.instructions.push(inst);
        pc += 4;
    }

    Ok(program)
}

fn parse_instruction(line: &str, pc: u32, line_no: usize) -> Result<Instruction, AsmError> {
    let cleaned = line.replace(',', " ");
    let mut parts = cleaned.split_whitespace();
    let mnemonic = parts.next().unwrap_or_default();
    let op = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line: line_no,
        mnemonic: mnemonic.to_string(),
    })?;
    let operands: Vec<&str> = parts.collect();

    let bad = |expected: &'static str| AsmError::BadOperands {
        line: line_no,
        mnemonic: mnemonic.to_string(),
        expected,
    };

    let mut inst = Instruction {
        op,
        pc,
        rs: None,
        rt: None,
        rd: None,
        imm: None,
    };

    match op {
        // I-type arithmetic and shifts: the target register is both
        // destination and (conceptually) one operand.
        Opcode::Addi
        | Opcode::Andi
        | Opcode::Ori
        | Opcode::Slti
        | Opcode::Sll
        | Opcode::Srl
        | Opcode::Sra => {
            let [rt, rs, imm] = expect_operands(&operands).ok_or_else(|| bad("$rt, $rs, imm"))?;
            inst.rt = Some(parse_reg(rt, line_no)?);
            inst.rs = Some(parse_reg(rs, line_no)?);
            inst.imm = Some(Immediate::Value(parse_imm(imm, line_no)?));
        }
        Opcode::Mfhi | Opcode::Mflo => {
            let [rd] = expect_operands(&operands).ok_or_else(|| bad("$rd"))?;
            inst.rd = Some(parse_reg(rd, line_no)?);
        }
        Opcode::Beq | Opcode::Bne | Opcode::Blt | Opcode::Bgt | Opcode::Ble | Opcode::Bge => {
            let [rs, rt, label] =
                expect_operands(&operands).ok_or_else(|| bad("$rs, $rt, label"))?;
            inst.rs = Some(parse_reg(rs, line_no)?);
            inst.rt = Some(parse_reg(rt, line_no)?);
            inst.imm = Some(Immediate::Label((*label).to_string()));
        }
        Opcode::Add | Opcode::Sub | Opcode::And | Opcode::Or | Opcode::Nor | Opcode::Slt
        | Opcode::Mult => {
            let [rd, rs, rt] = expect_operands(&operands).ok_or_else(|| bad("$rd, $rs, $rt"))?;
            inst.rd = Some(parse_reg(rd, line_no)?);
            inst.rs = Some(parse_reg(rs, line_no)?);
            inst.rt = Some(parse_reg(rt, line_no)?);
        }
        Opcode::Div => {
            let [rs, rt] = expect_operands(&operands).ok_or_else(|| bad("$rs, $rt"))?;
            inst.rs = Some(parse_reg(rs, line_no)?);
            inst.rt = Some(parse_reg(rt, line_no)?);
        }
        Opcode::J | Opcode::Jal => {
            let [label] = expect_operands(&operands).ok_or_else(|| bad("label"))?;
            inst.imm = Some(Immediate::Label((*label).to_string()));
        }
        Opcode::Jr => {
            let [rs] = expect_operands(&operands).ok_or_else(|| bad("$rs"))?;
            inst.rs = Some(parse_reg(rs, line_no)?);
        }
        Opcode::Lw | Opcode::Sw => {
            let [rt, mem] = expect_operands(&operands).ok_or_else(|| bad("$rt, offset($base)"))?;
            inst.rt = Some(parse_reg(rt, line_no)?);
            let (offset, base) = parse_mem_operand(mem, line_no)?;
            inst.rs = Some(base);
            inst.imm = Some(Immediate::Value(offset));
        }
        Opcode::Nop => {
            if !operands.is_empty() {
                return Err(bad("no operands"));
            }
        }
    }

    Ok(inst)
}

/// Fixed-arity view of the operand list.
fn expect_operands<'a, const N: usize>(operands: &[&'a str]) -> Option<[&'a str; N]> {
    <[&str; N]>::try_from(operands).ok()
}

fn parse_reg(token: &str, line: usize) -> Result<u8, AsmError> {
    abi::parse(token).ok_or_else(|| AsmError::UnknownRegister {
        line,
        token: token.to_string(),
    })
}

fn parse_imm(token: &str, line: usize) -> Result<i32, AsmError> {
    let err = || AsmError::BadImmediate {
        line,
        token: token.to_string(),
    };
    let (sign, body) = match token.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, token),
    };
    let value = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).map_err(|_| err())?
    } else {
        body.parse::<i64>().map_err(|_| err())?
    };
    i32::try_from(sign * value).map_err(|_| err())
}

/// Parses `offset($base)`; the offset may be omitted (treated as 0).
fn parse_mem_operand(token: &str, line: usize) -> Result<(i32, u8), AsmError> {
    let err = || AsmError::BadMemoryOperand {
        line,
        token: token.to_string(),
    };
    let (offset_str, rest) = token.split_once('(').ok_or_else(err)?;
    let base_str = rest.strip_suffix(')').ok_or_else(err)?;
    let offset = if offset_str.is_empty() {
        0
    } else {
        parse_imm(offset_str, line)?
    };
    let base = parse_reg(base_str, line)?;
    Ok((offset, base))
}
