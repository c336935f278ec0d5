//! LS-8 Instruction Set
//!
//! Instructions are one opcode byte followed by up to two operand bytes.
//!
//! ## Instruction Formats
//! - Z-type:  [opcode]
//! - R-type:  [opcode][reg]
//! - RR-type: [opcode][reg_a][reg_b]
//! - RI-type: [opcode][reg][imm8]

use crate::opcode::Opcode;
use crate::register::Register;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded LS-8 instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    // ========== System ==========
    /// HLT: stop the machine
    Hlt,

    // ========== Transfer ==========
    /// LDI: reg = imm
    Ldi { reg: Register, imm: u8 },

    /// LD: ra = mem[rb]
    Ld { ra: Register, rb: Register },

    /// ST: mem[ra] = rb
    St { ra: Register, rb: Register },

    // ========== Output ==========
    /// PRN: print reg as a decimal integer
    Prn { reg: Register },

    /// PRA: print reg as an ASCII character
    Pra { reg: Register },

    // ========== Stack ==========
    /// PUSH: SP -= 1; mem[SP] = reg
    Push { reg: Register },

    /// POP: reg = mem[SP]; SP += 1
    Pop { reg: Register },

    // ========== Control Flow ==========
    /// CALL: push return address, PC = reg
    Call { reg: Register },

    /// RET: PC = pop()
    Ret,

    /// JMP: PC = reg
    Jmp { reg: Register },

    /// JEQ: PC = reg if the equal flag is set
    Jeq { reg: Register },

    /// JNE: PC = reg if the equal flag is clear
    Jne { reg: Register },

    // ========== ALU ==========
    /// ADD: ra = ra + rb (wrapping)
    Add { ra: Register, rb: Register },

    /// SUB: ra = ra - rb (wrapping)
    Sub { ra: Register, rb: Register },

    /// MUL: ra = ra * rb (wrapping)
    Mul { ra: Register, rb: Register },

    /// DIV: ra = ra / rb
    Div { ra: Register, rb: Register },

    /// MOD: ra = ra % rb
    Mod { ra: Register, rb: Register },

    /// CMP: equal = (ra == rb)
    Cmp { ra: Register, rb: Register },

    /// AND: ra = ra & rb
    And { ra: Register, rb: Register },

    /// OR: ra = ra | rb
    Or { ra: Register, rb: Register },

    /// XOR: ra = ra ^ rb
    Xor { ra: Register, rb: Register },

    /// SHL: ra = ra << rb
    Shl { ra: Register, rb: Register },

    /// SHR: ra = ra >> rb
    Shr { ra: Register, rb: Register },

    /// INC: reg = reg + 1 (wrapping)
    Inc { reg: Register },

    /// DEC: reg = reg - 1 (wrapping)
    Dec { reg: Register },

    /// NOT: reg = !reg
    Not { reg: Register },
}

impl Instruction {
    /// Opcode this instruction encodes to
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Hlt => Opcode::Hlt,
            Instruction::Ldi { .. } => Opcode::Ldi,
            Instruction::Ld { .. } => Opcode::Ld,
            Instruction::St { .. } => Opcode::St,
            Instruction::Prn { .. } => Opcode::Prn,
            Instruction::Pra { .. } => Opcode::Pra,
            Instruction::Push { .. } => Opcode::Push,
            Instruction::Pop { .. } => Opcode::Pop,
            Instruction::Call { .. } => Opcode::Call,
            Instruction::Ret => Opcode::Ret,
            Instruction::Jmp { .. } => Opcode::Jmp,
            Instruction::Jeq { .. } => Opcode::Jeq,
            Instruction::Jne { .. } => Opcode::Jne,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Sub { .. } => Opcode::Sub,
            Instruction::Mul { .. } => Opcode::Mul,
            Instruction::Div { .. } => Opcode::Div,
            Instruction::Mod { .. } => Opcode::Mod,
            Instruction::Cmp { .. } => Opcode::Cmp,
            Instruction::And { .. } => Opcode::And,
            Instruction::Or { .. } => Opcode::Or,
            Instruction::Xor { .. } => Opcode::Xor,
            Instruction::Shl { .. } => Opcode::Shl,
            Instruction::Shr { .. } => Opcode::Shr,
            Instruction::Inc { .. } => Opcode::Inc,
            Instruction::Dec { .. } => Opcode::Dec,
            Instruction::Not { .. } => Opcode::Not,
        }
    }

    /// Get instruction mnemonic
    pub fn mnemonic(&self) -> &'static str {
        self.opcode().mnemonic()
    }

    /// Encoded width in bytes
    pub fn width(&self) -> usize {
        self.opcode().width()
    }

    /// Operand bytes in encoding order
    pub fn operands(&self) -> Vec<u8> {
        match *self {
            Instruction::Hlt | Instruction::Ret => vec![],

            Instruction::Ldi { reg, imm } => vec![reg.into(), imm],

            Instruction::Prn { reg }
            | Instruction::Pra { reg }
            | Instruction::Push { reg }
            | Instruction::Pop { reg }
            | Instruction::Call { reg }
            | Instruction::Jmp { reg }
            | Instruction::Jeq { reg }
            | Instruction::Jne { reg }
            | Instruction::Inc { reg }
            | Instruction::Dec { reg }
            | Instruction::Not { reg } => vec![reg.into()],

            Instruction::Ld { ra, rb }
            | Instruction::St { ra, rb }
            | Instruction::Add { ra, rb }
            | Instruction::Sub { ra, rb }
            | Instruction::Mul { ra, rb }
            | Instruction::Div { ra, rb }
            | Instruction::Mod { ra, rb }
            | Instruction::Cmp { ra, rb }
            | Instruction::And { ra, rb }
            | Instruction::Or { ra, rb }
            | Instruction::Xor { ra, rb }
            | Instruction::Shl { ra, rb }
            | Instruction::Shr { ra, rb } => vec![ra.into(), rb.into()],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Hlt | Instruction::Ret => write!(f, "{}", self.mnemonic()),

            Instruction::Ldi { reg, imm } => write!(f, "{} {},{}", self.mnemonic(), reg, imm),

            Instruction::Prn { reg }
            | Instruction::Pra { reg }
            | Instruction::Push { reg }
            | Instruction::Pop { reg }
            | Instruction::Call { reg }
            | Instruction::Jmp { reg }
            | Instruction::Jeq { reg }
            | Instruction::Jne { reg }
            | Instruction::Inc { reg }
            | Instruction::Dec { reg }
            | Instruction::Not { reg } => write!(f, "{} {}", self.mnemonic(), reg),

            Instruction::Ld { ra, rb }
            | Instruction::St { ra, rb }
            | Instruction::Add { ra, rb }
            | Instruction::Sub { ra, rb }
            | Instruction::Mul { ra, rb }
            | Instruction::Div { ra, rb }
            | Instruction::Mod { ra, rb }
            | Instruction::Cmp { ra, rb }
            | Instruction::And { ra, rb }
            | Instruction::Or { ra, rb }
            | Instruction::Xor { ra, rb }
            | Instruction::Shl { ra, rb }
            | Instruction::Shr { ra, rb } => write!(f, "{} {},{}", self.mnemonic(), ra, rb),
        }
    }
}
