//! Execution trace rows

use serde::{Deserialize, Serialize};
use ls8_spec::NUM_REGISTERS;

/// Machine state captured before one instruction executes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRow {
    /// Cycle at which the instruction was fetched (0-based)
    pub cycle: u64,

    /// Address the instruction was fetched from
    pub pc: u8,

    /// Opcode byte
    pub opcode: u8,

    /// Operand bytes, in memory order
    pub operands: Vec<u8>,

    /// Registers before execution
    pub registers: [u8; NUM_REGISTERS],

    /// Flags before execution
    pub flags: u8,
}

impl TraceRow {
    /// Raw instruction bytes: opcode followed by operands
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.operands.len());
        bytes.push(self.opcode);
        bytes.extend_from_slice(&self.operands);
        bytes
    }
}
