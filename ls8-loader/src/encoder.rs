//! Instruction encoding for LS-8

use ls8_spec::{Instruction, Program};
use crate::error::Result;

/// Encode a single instruction to its opcode and operand bytes
pub fn encode(instr: &Instruction) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(instr.width());
    bytes.push(instr.opcode().to_u8());
    bytes.extend(instr.operands());
    bytes
}

/// Encode a sequence of instructions into a program image starting at address 0
pub fn encode_program(instrs: &[Instruction]) -> Result<Program> {
    let mut program = Program::new();
    for instr in instrs {
        program.extend_from_slice(&encode(instr))?;
    }
    Ok(program)
}
