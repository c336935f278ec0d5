//! Arithmetic/logic unit
//!
//! ALU operations never branch, so each one advances the PC past its own
//! instruction. A fault leaves registers, flags and the PC untouched.

use ls8_spec::{Opcode, Register};
use crate::state::{Fault, Machine};

/// ALU operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Cmp,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Inc,
    Dec,
    Not,
}

impl AluOp {
    /// Opcode that selects this operation
    pub fn opcode(self) -> Opcode {
        match self {
            AluOp::Add => Opcode::Add,
            AluOp::Sub => Opcode::Sub,
            AluOp::Mul => Opcode::Mul,
            AluOp::Div => Opcode::Div,
            AluOp::Mod => Opcode::Mod,
            AluOp::Cmp => Opcode::Cmp,
            AluOp::And => Opcode::And,
            AluOp::Or => Opcode::Or,
            AluOp::Xor => Opcode::Xor,
            AluOp::Shl => Opcode::Shl,
            AluOp::Shr => Opcode::Shr,
            AluOp::Inc => Opcode::Inc,
            AluOp::Dec => Opcode::Dec,
            AluOp::Not => Opcode::Not,
        }
    }
}

/// Shift that drops every bit once the distance reaches the register width
#[inline]
fn shift_left(value: u8, distance: u8) -> u8 {
    value.checked_shl(distance as u32).unwrap_or(0)
}

#[inline]
fn shift_right(value: u8, distance: u8) -> u8 {
    value.checked_shr(distance as u32).unwrap_or(0)
}

/// Run `op` on `reg_a` and `reg_b`, storing the result in `reg_a` (or the
/// equal flag for CMP) and advancing the PC. Unary operations ignore `reg_b`.
pub fn alu(machine: &mut Machine, op: AluOp, reg_a: Register, reg_b: Register) -> Result<(), Fault> {
    let a = machine.read_reg(reg_a);
    let b = machine.read_reg(reg_b);

    let result = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Div => a
            .checked_div(b)
            .ok_or(Fault::DivisionByZero { pc: machine.pc })?,
        AluOp::Mod => a
            .checked_rem(b)
            .ok_or(Fault::DivisionByZero { pc: machine.pc })?,
        AluOp::Cmp => {
            machine.flags.set_equal(a == b);
            machine.advance(op.opcode().width());
            return Ok(());
        }
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Shl => shift_left(a, b),
        AluOp::Shr => shift_right(a, b),
        AluOp::Inc => a.wrapping_add(1),
        AluOp::Dec => a.wrapping_sub(1),
        AluOp::Not => !a,
    };

    machine.write_reg(reg_a, result);
    machine.advance(op.opcode().width());
    Ok(())
}
