//! # LS-8 Opcode Definitions
//!
//! Every instruction is identified by its full opcode byte. The byte also
//! carries metadata in its high bits:
//!
//! ```text
//! bit 7-6  operand count
//! bit 5    ALU operation
//! bit 4    sets PC
//! bit 3-0  identifier
//! ```
//!
//! ## Opcode Map
//! - 0x01, 0x11: System / return (HLT, RET)
//! - 0x45-0x48: Stack and output (PUSH, POP, PRN, PRA)
//! - 0x50-0x56: Control flow (CALL, JMP, JEQ, JNE)
//! - 0x65-0x69: Unary ALU (INC, DEC, NOT)
//! - 0x82-0x84: Register/memory transfer (LDI, LD, ST)
//! - 0xA0-0xAD: Binary ALU (ADD, SUB, MUL, DIV, MOD, CMP, AND, OR, XOR, SHL, SHR)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== System ==========
    /// HLT: halt the machine
    Hlt = 0b0000_0001,
    /// RET: PC = pop()
    Ret = 0b0001_0001,

    // ========== Stack / Output ==========
    /// PUSH: push(r[a])
    Push = 0b0100_0101,
    /// POP: r[a] = pop()
    Pop = 0b0100_0110,
    /// PRN: print r[a] as decimal
    Prn = 0b0100_0111,
    /// PRA: print r[a] as ASCII
    Pra = 0b0100_1000,

    // ========== Control Flow ==========
    /// CALL: push(PC + 2); PC = r[a]
    Call = 0b0101_0000,
    /// JMP: PC = r[a]
    Jmp = 0b0101_0100,
    /// JEQ: if equal { PC = r[a] }
    Jeq = 0b0101_0101,
    /// JNE: if !equal { PC = r[a] }
    Jne = 0b0101_0110,

    // ========== Unary ALU ==========
    /// INC: r[a] += 1
    Inc = 0b0110_0101,
    /// DEC: r[a] -= 1
    Dec = 0b0110_0110,
    /// NOT: r[a] = !r[a]
    Not = 0b0110_1001,

    // ========== Transfer ==========
    /// LDI: r[a] = imm
    Ldi = 0b1000_0010,
    /// LD: r[a] = mem[r[b]]
    Ld = 0b1000_0011,
    /// ST: mem[r[a]] = r[b]
    St = 0b1000_0100,

    // ========== Binary ALU ==========
    /// ADD: r[a] += r[b]
    Add = 0b1010_0000,
    /// SUB: r[a] -= r[b]
    Sub = 0b1010_0001,
    /// MUL: r[a] *= r[b]
    Mul = 0b1010_0010,
    /// DIV: r[a] /= r[b]
    Div = 0b1010_0011,
    /// MOD: r[a] %= r[b]
    Mod = 0b1010_0100,
    /// CMP: equal = r[a] == r[b]
    Cmp = 0b1010_0111,
    /// AND: r[a] &= r[b]
    And = 0b1010_1000,
    /// OR: r[a] |= r[b]
    Or = 0b1010_1010,
    /// XOR: r[a] ^= r[b]
    Xor = 0b1010_1011,
    /// SHL: r[a] <<= r[b]
    Shl = 0b1010_1100,
    /// SHR: r[a] >>= r[b]
    Shr = 0b1010_1101,
}

/// Broad grouping used by tooling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionFamily {
    System,
    Stack,
    Output,
    ControlFlow,
    Transfer,
    Alu,
}

impl Opcode {
    /// Every defined opcode, in encoding order
    pub const ALL: [Opcode; 27] = [
        Opcode::Hlt,
        Opcode::Ret,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Prn,
        Opcode::Pra,
        Opcode::Call,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Not,
        Opcode::Ldi,
        Opcode::Ld,
        Opcode::St,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Cmp,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shl,
        Opcode::Shr,
    ];

    const ALU_BIT: u8 = 0b0010_0000;
    const SETS_PC_BIT: u8 = 0b0001_0000;

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Opcode::Hlt),
            0x11 => Some(Opcode::Ret),

            0x45 => Some(Opcode::Push),
            0x46 => Some(Opcode::Pop),
            0x47 => Some(Opcode::Prn),
            0x48 => Some(Opcode::Pra),

            0x50 => Some(Opcode::Call),
            0x54 => Some(Opcode::Jmp),
            0x55 => Some(Opcode::Jeq),
            0x56 => Some(Opcode::Jne),

            0x65 => Some(Opcode::Inc),
            0x66 => Some(Opcode::Dec),
            0x69 => Some(Opcode::Not),

            0x82 => Some(Opcode::Ldi),
            0x83 => Some(Opcode::Ld),
            0x84 => Some(Opcode::St),

            0xA0 => Some(Opcode::Add),
            0xA1 => Some(Opcode::Sub),
            0xA2 => Some(Opcode::Mul),
            0xA3 => Some(Opcode::Div),
            0xA4 => Some(Opcode::Mod),
            0xA7 => Some(Opcode::Cmp),
            0xA8 => Some(Opcode::And),
            0xAA => Some(Opcode::Or),
            0xAB => Some(Opcode::Xor),
            0xAC => Some(Opcode::Shl),
            0xAD => Some(Opcode::Shr),

            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Operand count encoded in the two high bits of any opcode byte
    #[inline]
    pub const fn operand_count_of(byte: u8) -> usize {
        (byte >> 6) as usize
    }

    /// Number of operand bytes following the opcode
    #[inline]
    pub const fn operand_count(self) -> usize {
        Self::operand_count_of(self as u8)
    }

    /// Total instruction width in bytes
    #[inline]
    pub const fn width(self) -> usize {
        1 + self.operand_count()
    }

    /// Check if this opcode is executed by the ALU
    #[inline]
    pub const fn is_alu(self) -> bool {
        self as u8 & Self::ALU_BIT != 0
    }

    /// Check if this opcode redirects the PC itself
    #[inline]
    pub const fn sets_pc(self) -> bool {
        self as u8 & Self::SETS_PC_BIT != 0
    }

    /// Get the instruction family
    pub const fn family(self) -> InstructionFamily {
        match self {
            Opcode::Hlt => InstructionFamily::System,
            Opcode::Push | Opcode::Pop => InstructionFamily::Stack,
            Opcode::Prn | Opcode::Pra => InstructionFamily::Output,
            Opcode::Call | Opcode::Ret | Opcode::Jmp | Opcode::Jeq | Opcode::Jne => {
                InstructionFamily::ControlFlow
            }
            Opcode::Ldi | Opcode::Ld | Opcode::St => InstructionFamily::Transfer,
            _ => InstructionFamily::Alu,
        }
    }

    /// Assembly mnemonic
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ret => "RET",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Prn => "PRN",
            Opcode::Pra => "PRA",
            Opcode::Call => "CALL",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Not => "NOT",
            Opcode::Ldi => "LDI",
            Opcode::Ld => "LD",
            Opcode::St => "ST",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Cmp => "CMP",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Shl => "SHL",
            Opcode::Shr => "SHR",
        }
    }

    /// Look up an opcode by mnemonic (case-insensitive)
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }
}

impl TryFrom<u8> for Opcode {
    type Error = crate::Ls8Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Opcode::from_u8(value).ok_or(crate::Ls8Error::InvalidOpcode(value))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
