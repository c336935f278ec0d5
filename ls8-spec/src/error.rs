//! # Error Types for LS-8

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Ls8Error {
    // Program image errors
    #[error("Program too large: {found} bytes exceeds the {capacity}-byte address space")]
    ProgramTooLarge { capacity: usize, found: usize },

    // Instruction errors
    #[error("Invalid opcode: {0:#04x}")]
    InvalidOpcode(u8),

    #[error("Invalid register index: {0} (valid range: 0-7)")]
    InvalidRegister(u8),
}
