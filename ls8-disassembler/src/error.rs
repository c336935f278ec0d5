//! Disassembler errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisassemblerError {
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    #[error("Invalid register operand {index} for opcode 0x{opcode:02X}")]
    InvalidRegister { opcode: u8, index: u8 },

    #[error("Truncated instruction 0x{opcode:02X}: needs {needed} operand byte(s), found {found}")]
    Truncated { opcode: u8, needed: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
