//! Instruction execution for LS-8

use ls8_spec::Instruction;
use crate::alu::{alu, AluOp};
use crate::error::Result;
use crate::io::{IOHandler, Output};
use crate::state::{HaltReason, Machine, Step};

/// Execute a single decoded instruction.
///
/// Every instruction leaves the PC at the next instruction to fetch: ALU
/// operations advance it inside [`alu`], control-flow instructions redirect
/// it, everything else skips its own operands.
pub fn execute(instr: &Instruction, machine: &mut Machine, io: &mut IOHandler) -> Result<Step> {
    let width = instr.width();

    match *instr {
        // ========== System ==========
        Instruction::Hlt => {
            machine.halt(HaltReason::Halt);
            machine.advance(width);
            return Ok(Step::Halted);
        }

        // ========== Transfer ==========
        Instruction::Ldi { reg, imm } => {
            machine.write_reg(reg, imm);
            machine.advance(width);
        }

        Instruction::Ld { ra, rb } => {
            let value = machine.ram_read(machine.read_reg(rb));
            machine.write_reg(ra, value);
            machine.advance(width);
        }

        Instruction::St { ra, rb } => {
            machine.ram_write(machine.read_reg(ra), machine.read_reg(rb));
            machine.advance(width);
        }

        // ========== Output ==========
        Instruction::Prn { reg } => {
            io.emit(Output::Number(machine.read_reg(reg)))?;
            machine.advance(width);
        }

        Instruction::Pra { reg } => {
            io.emit(Output::Char(machine.read_reg(reg)))?;
            machine.advance(width);
        }

        // ========== Stack ==========
        Instruction::Push { reg } => {
            machine.push(machine.read_reg(reg));
            machine.advance(width);
        }

        Instruction::Pop { reg } => {
            let value = machine.pop();
            machine.write_reg(reg, value);
            machine.advance(width);
        }

        // ========== Control Flow ==========
        Instruction::Call { reg } => {
            let return_addr = machine.pc.wrapping_add(width as u8);
            let target = machine.read_reg(reg);
            machine.push(return_addr);
            machine.pc = target;
        }

        Instruction::Ret => {
            machine.pc = machine.pop();
        }

        Instruction::Jmp { reg } => {
            machine.pc = machine.read_reg(reg);
        }

        Instruction::Jeq { reg } => {
            if machine.flags.equal() {
                machine.pc = machine.read_reg(reg);
            } else {
                machine.advance(width);
            }
        }

        Instruction::Jne { reg } => {
            if !machine.flags.equal() {
                machine.pc = machine.read_reg(reg);
            } else {
                machine.advance(width);
            }
        }

        // ========== ALU ==========
        Instruction::Add { ra, rb } => return Ok(run_alu(machine, AluOp::Add, ra, rb)),
        Instruction::Sub { ra, rb } => return Ok(run_alu(machine, AluOp::Sub, ra, rb)),
        Instruction::Mul { ra, rb } => return Ok(run_alu(machine, AluOp::Mul, ra, rb)),
        Instruction::Div { ra, rb } => return Ok(run_alu(machine, AluOp::Div, ra, rb)),
        Instruction::Mod { ra, rb } => return Ok(run_alu(machine, AluOp::Mod, ra, rb)),
        Instruction::Cmp { ra, rb } => return Ok(run_alu(machine, AluOp::Cmp, ra, rb)),
        Instruction::And { ra, rb } => return Ok(run_alu(machine, AluOp::And, ra, rb)),
        Instruction::Or { ra, rb } => return Ok(run_alu(machine, AluOp::Or, ra, rb)),
        Instruction::Xor { ra, rb } => return Ok(run_alu(machine, AluOp::Xor, ra, rb)),
        Instruction::Shl { ra, rb } => return Ok(run_alu(machine, AluOp::Shl, ra, rb)),
        Instruction::Shr { ra, rb } => return Ok(run_alu(machine, AluOp::Shr, ra, rb)),
        Instruction::Inc { reg } => return Ok(run_alu(machine, AluOp::Inc, reg, reg)),
        Instruction::Dec { reg } => return Ok(run_alu(machine, AluOp::Dec, reg, reg)),
        Instruction::Not { reg } => return Ok(run_alu(machine, AluOp::Not, reg, reg)),
    }

    Ok(Step::Continue)
}

fn run_alu(
    machine: &mut Machine,
    op: AluOp,
    reg_a: ls8_spec::Register,
    reg_b: ls8_spec::Register,
) -> Step {
    match alu(machine, op, reg_a, reg_b) {
        Ok(()) => Step::Continue,
        Err(fault) => machine.fault(fault),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls8_spec::Register;
    use crate::state::Fault;

    fn exec(machine: &mut Machine, instr: Instruction) -> Step {
        let mut io = IOHandler::new();
        execute(&instr, machine, &mut io).unwrap()
    }

    #[test]
    fn test_ldi() {
        let mut machine = Machine::new();
        let step = exec(&mut machine, Instruction::Ldi { reg: Register::R2, imm: 0x99 });
        assert_eq!(step, Step::Continue);
        assert_eq!(machine.read_reg(Register::R2), 0x99);
        assert_eq!(machine.pc, 3);
    }

    #[test]
    fn test_prn_output() {
        let mut machine = Machine::new();
        machine.write_reg(Register::R0, 72);
        let mut io = IOHandler::new();
        execute(&Instruction::Prn { reg: Register::R0 }, &mut machine, &mut io).unwrap();
        assert_eq!(io.text(), "72\n");
        assert_eq!(machine.pc, 2);
    }

    #[test]
    fn test_pra_output() {
        let mut machine = Machine::new();
        machine.write_reg(Register::R1, b'A');
        let mut io = IOHandler::new();
        execute(&Instruction::Pra { reg: Register::R1 }, &mut machine, &mut io).unwrap();
        assert_eq!(io.text(), "A");
    }

    #[test]
    fn test_ld_st() {
        let mut machine = Machine::new();
        machine.write_reg(Register::R0, 0x80);
        machine.write_reg(Register::R1, 0x5A);
        exec(&mut machine, Instruction::St { ra: Register::R0, rb: Register::R1 });
        assert_eq!(machine.ram_read(0x80), 0x5A);

        exec(&mut machine, Instruction::Ld { ra: Register::R2, rb: Register::R0 });
        assert_eq!(machine.read_reg(Register::R2), 0x5A);
        assert_eq!(machine.pc, 6);
    }

    #[test]
    fn test_push_pop_restores_sp() {
        let mut machine = Machine::new();
        machine.write_reg(Register::R0, 0x42);
        exec(&mut machine, Instruction::Push { reg: Register::R0 });
        assert_eq!(machine.sp(), 0xF3);
        machine.write_reg(Register::R0, 0);
        exec(&mut machine, Instruction::Pop { reg: Register::R0 });
        assert_eq!(machine.read_reg(Register::R0), 0x42);
        assert_eq!(machine.sp(), 0xF4);
        assert_eq!(machine.pc, 4);
    }

    #[test]
    fn test_call_ret() {
        let mut machine = Machine::new();
        machine.pc = 0x10;
        machine.write_reg(Register::R1, 0x40);
        exec(&mut machine, Instruction::Call { reg: Register::R1 });
        assert_eq!(machine.pc, 0x40);
        assert_eq!(machine.sp(), 0xF3);
        assert_eq!(machine.ram_read(0xF3), 0x12);

        exec(&mut machine, Instruction::Ret);
        assert_eq!(machine.pc, 0x12);
        assert_eq!(machine.sp(), 0xF4);
    }

    #[test]
    fn test_call_through_stack_pointer_register() {
        let mut machine = Machine::new();
        exec(&mut machine, Instruction::Call { reg: Register::SP });
        assert_eq!(machine.pc, 0xF4);
    }

    #[test]
    fn test_jumps() {
        let mut machine = Machine::new();
        machine.write_reg(Register::R3, 0x30);
        exec(&mut machine, Instruction::Jmp { reg: Register::R3 });
        assert_eq!(machine.pc, 0x30);

        machine.flags.set_equal(true);
        exec(&mut machine, Instruction::Jne { reg: Register::R3 });
        assert_eq!(machine.pc, 0x32);
        machine.write_reg(Register::R3, 0x50);
        exec(&mut machine, Instruction::Jeq { reg: Register::R3 });
        assert_eq!(machine.pc, 0x50);

        machine.flags.set_equal(false);
        exec(&mut machine, Instruction::Jeq { reg: Register::R3 });
        assert_eq!(machine.pc, 0x52);
        machine.write_reg(Register::R3, 0x05);
        exec(&mut machine, Instruction::Jne { reg: Register::R3 });
        assert_eq!(machine.pc, 0x05);
    }

    #[test]
    fn test_hlt() {
        let mut machine = Machine::new();
        let step = exec(&mut machine, Instruction::Hlt);
        assert_eq!(step, Step::Halted);
        assert_eq!(machine.halt_reason, Some(HaltReason::Halt));
        assert_eq!(machine.pc, 1);
    }

    #[test]
    fn test_mod_by_zero_faults() {
        let mut machine = Machine::new();
        machine.pc = 0x09;
        machine.write_reg(Register::R0, 10);
        let step = exec(&mut machine, Instruction::Mod { ra: Register::R0, rb: Register::R1 });
        let fault = Fault::DivisionByZero { pc: 0x09 };
        assert_eq!(step, Step::Fault(fault));
        assert_eq!(machine.halt_reason, Some(HaltReason::Fault(fault)));
        assert_eq!(machine.read_reg(Register::R0), 10);
    }

    #[test]
    fn test_alu_dispatch() {
        let mut machine = Machine::new();
        machine.write_reg(Register::R0, 8);
        machine.write_reg(Register::R1, 9);
        exec(&mut machine, Instruction::Mul { ra: Register::R0, rb: Register::R1 });
        assert_eq!(machine.read_reg(Register::R0), 72);
        exec(&mut machine, Instruction::Inc { reg: Register::R0 });
        assert_eq!(machine.read_reg(Register::R0), 73);
        assert_eq!(machine.pc, 5);
    }
}
