//! # LS-8 Runtime
//!
//! Execute LS-8 programs on an emulated 8-bit CPU.
//!
//! ## Features
//!
//! - **8 registers**: R0-R7, R7 doubling as the stack pointer
//! - **256 bytes of memory**: code, data and stack share one address space
//! - **Fetch-decode-execute loop**: single stepping or run-to-halt
//! - **Faults as data**: division by zero, unknown opcodes and bad register
//!   operands stop the machine with a [`HaltReason::Fault`]
//! - **Output capture**: PRN/PRA values are recorded and optionally streamed
//!
//! ## Example
//!
//! ```rust
//! use ls8_runtime::{VM, VMConfig};
//! use ls8_spec::Program;
//!
//! // LDI R0,8; PRN R0; HLT
//! let program = Program::from_bytes(vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]).unwrap();
//! let result = VM::new(&program, VMConfig::default()).run().unwrap();
//! assert_eq!(result.output_text(), "8\n");
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod alu;
pub mod execute;
pub mod io;
pub mod trace;
pub mod vm;

pub use state::{Fault, Flags, HaltReason, Machine, Step};
pub use memory::Memory;
pub use alu::{alu, AluOp};
pub use execute::execute;
pub use io::{IOHandler, Output};
pub use trace::TraceRow;
pub use vm::{VM, VMConfig, ExecutionResult};
pub use error::{RuntimeError, Result};

/// Simple execution helper
///
/// Runs a program to completion with the default configuration.
pub fn run(program: &ls8_spec::Program) -> Result<ExecutionResult> {
    VM::new(program, VMConfig::default()).run()
}
