//! Instruction decoder

use ls8_spec::{Instruction, Opcode, Register};
use crate::error::{DisassemblerError, Result};

/// Decode an opcode byte and the operand bytes that follow it.
///
/// `operands` may hold more bytes than the opcode needs; only the first
/// `operand_count` are read.
pub fn decode(opcode: u8, operands: &[u8]) -> Result<Instruction> {
    let op = Opcode::from_u8(opcode).ok_or(DisassemblerError::UnknownOpcode(opcode))?;

    let needed = op.operand_count();
    if operands.len() < needed {
        return Err(DisassemblerError::Truncated {
            opcode,
            needed,
            found: operands.len(),
        });
    }

    let reg = |index: usize| decode_register(opcode, operands[index]);

    let instr = match op {
        Opcode::Hlt => Instruction::Hlt,
        Opcode::Ret => Instruction::Ret,

        Opcode::Push => Instruction::Push { reg: reg(0)? },
        Opcode::Pop => Instruction::Pop { reg: reg(0)? },
        Opcode::Prn => Instruction::Prn { reg: reg(0)? },
        Opcode::Pra => Instruction::Pra { reg: reg(0)? },

        Opcode::Call => Instruction::Call { reg: reg(0)? },
        Opcode::Jmp => Instruction::Jmp { reg: reg(0)? },
        Opcode::Jeq => Instruction::Jeq { reg: reg(0)? },
        Opcode::Jne => Instruction::Jne { reg: reg(0)? },

        Opcode::Inc => Instruction::Inc { reg: reg(0)? },
        Opcode::Dec => Instruction::Dec { reg: reg(0)? },
        Opcode::Not => Instruction::Not { reg: reg(0)? },

        Opcode::Ldi => Instruction::Ldi {
            reg: reg(0)?,
            imm: operands[1],
        },
        Opcode::Ld => Instruction::Ld { ra: reg(0)?, rb: reg(1)? },
        Opcode::St => Instruction::St { ra: reg(0)?, rb: reg(1)? },

        Opcode::Add => Instruction::Add { ra: reg(0)?, rb: reg(1)? },
        Opcode::Sub => Instruction::Sub { ra: reg(0)?, rb: reg(1)? },
        Opcode::Mul => Instruction::Mul { ra: reg(0)?, rb: reg(1)? },
        Opcode::Div => Instruction::Div { ra: reg(0)?, rb: reg(1)? },
        Opcode::Mod => Instruction::Mod { ra: reg(0)?, rb: reg(1)? },
        Opcode::Cmp => Instruction::Cmp { ra: reg(0)?, rb: reg(1)? },
        Opcode::And => Instruction::And { ra: reg(0)?, rb: reg(1)? },
        Opcode::Or => Instruction::Or { ra: reg(0)?, rb: reg(1)? },
        Opcode::Xor => Instruction::Xor { ra: reg(0)?, rb: reg(1)? },
        Opcode::Shl => Instruction::Shl { ra: reg(0)?, rb: reg(1)? },
        Opcode::Shr => Instruction::Shr { ra: reg(0)?, rb: reg(1)? },
    };

    Ok(instr)
}

/// Decode the instruction starting at `addr` in a byte image.
///
/// Operands are not wrapped around the end of `bytes`; a listing stops at the
/// end of the image.
pub fn decode_at(bytes: &[u8], addr: usize) -> Result<Instruction> {
    let opcode = bytes[addr];
    let needed = Opcode::operand_count_of(opcode);
    let end = (addr + 1 + needed).min(bytes.len());
    decode(opcode, &bytes[addr + 1..end])
}

fn decode_register(opcode: u8, index: u8) -> Result<Register> {
    Register::from_index(index).ok_or(DisassemblerError::InvalidRegister { opcode, index })
}
