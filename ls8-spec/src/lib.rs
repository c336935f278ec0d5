//! # LS-8 Specification
//!
//! 8-bit register machine with a unified 256-byte address space.
//!
//! ## Key Features
//! - 8 general-purpose 8-bit registers, R7 doubles as the stack pointer
//! - 256 bytes of memory shared by code, data and the stack (von Neumann)
//! - Variable-width instructions: one opcode byte plus 0-2 operand bytes
//! - Operand count encoded in the two high bits of the opcode
//! - A single `equal` condition flag set by `CMP`
//!
//! ## Opcode Layout
//!
//! ```text
//! AABCDDDD
//! AA   operand count (0-2)
//! B    1 if handled by the ALU
//! C    1 if the instruction sets the PC itself
//! DDDD instruction identifier
//! ```

pub mod register;
pub mod opcode;
pub mod instruction;
pub mod error;
pub mod program;

pub use register::{Register, NUM_REGISTERS};
pub use opcode::{Opcode, InstructionFamily};
pub use instruction::Instruction;
pub use error::Ls8Error;
pub use program::Program;

/// Size of the address space in bytes
pub const MEMORY_SIZE: usize = 256;

/// Initial value of the stack pointer (R7)
pub const STACK_TOP: u8 = 0xF4;

/// Address the program image is loaded at and execution starts from
pub const ENTRY_POINT: u8 = 0x00;

/// Longest instruction: opcode plus two operands
pub const MAX_INSTRUCTION_WIDTH: usize = 3;
