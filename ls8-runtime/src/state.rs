//! Machine state for LS-8

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ls8_spec::{Program, Register, NUM_REGISTERS, STACK_TOP, ENTRY_POINT};
use crate::memory::Memory;

/// Condition flags register
///
/// Only the `equal` bit is defined; the remaining bits always read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags(u8);

impl Flags {
    /// Bit set when the last CMP found its operands equal
    pub const EQUAL: u8 = 0b0000_0001;

    #[inline]
    pub fn equal(self) -> bool {
        self.0 & Self::EQUAL != 0
    }

    #[inline]
    pub fn set_equal(&mut self, equal: bool) {
        if equal {
            self.0 |= Self::EQUAL;
        } else {
            self.0 &= !Self::EQUAL;
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// A fault raised by the running program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Fault {
    #[error("Division by zero at PC {pc:#04x}")]
    DivisionByZero { pc: u8 },

    #[error("Invalid opcode {opcode:#04x} at PC {pc:#04x}")]
    InvalidOpcode { pc: u8, opcode: u8 },

    #[error("Invalid register {index} for opcode {opcode:#04x} at PC {pc:#04x}")]
    InvalidRegister { pc: u8, opcode: u8, index: u8 },
}

impl Fault {
    /// Address of the faulting instruction
    pub fn pc(&self) -> u8 {
        match *self {
            Fault::DivisionByZero { pc }
            | Fault::InvalidOpcode { pc, .. }
            | Fault::InvalidRegister { pc, .. } => pc,
        }
    }
}

/// Outcome of a single fetch-decode-execute step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Machine is still running
    Continue,
    /// Machine stopped
    Halted,
    /// Machine stopped on a fault
    Fault(Fault),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// HLT instruction
    Halt,
    /// Program fault
    Fault(Fault),
    /// Cycle budget exhausted
    CycleLimit,
}

/// LS-8 machine: registers, flags, program counter and memory
#[derive(Debug, Clone)]
pub struct Machine {
    /// General-purpose registers (R7 is the stack pointer)
    pub registers: [u8; NUM_REGISTERS],

    /// Program counter
    pub pc: u8,

    /// Condition flags
    pub flags: Flags,

    /// Memory
    pub memory: Memory,

    /// Executed step count
    pub cycles: u64,

    /// Halt reason, `None` while running
    pub halt_reason: Option<HaltReason>,
}

impl Machine {
    /// Zero-initialized machine with the stack pointer at [`STACK_TOP`]
    pub fn new() -> Self {
        let mut machine = Machine {
            registers: [0; NUM_REGISTERS],
            pc: ENTRY_POINT,
            flags: Flags::default(),
            memory: Memory::new(),
            cycles: 0,
            halt_reason: None,
        };

        machine.write_reg(Register::SP, STACK_TOP);

        machine
    }

    /// Fresh machine with a program loaded at the entry point
    pub fn with_program(program: &Program) -> Self {
        let mut machine = Self::new();
        machine.memory.load_program(program);
        machine
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> u8 {
        self.registers[reg.index()]
    }

    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: u8) {
        self.registers[reg.index()] = value;
    }

    #[inline]
    pub fn ram_read(&self, addr: u8) -> u8 {
        self.memory.read(addr)
    }

    #[inline]
    pub fn ram_write(&mut self, addr: u8, value: u8) {
        self.memory.write(addr, value);
    }

    /// Current stack pointer
    #[inline]
    pub fn sp(&self) -> u8 {
        self.read_reg(Register::SP)
    }

    /// Decrement SP, then store `value` at the new top of stack
    pub fn push(&mut self, value: u8) {
        let sp = self.sp().wrapping_sub(1);
        self.write_reg(Register::SP, sp);
        self.ram_write(sp, value);
    }

    /// Read the top of stack, then increment SP
    pub fn pop(&mut self) -> u8 {
        let sp = self.sp();
        let value = self.ram_read(sp);
        self.write_reg(Register::SP, sp.wrapping_add(1));
        value
    }

    /// Move the PC forward by `width` bytes
    #[inline]
    pub fn advance(&mut self, width: usize) {
        self.pc = self.pc.wrapping_add(width as u8);
    }

    pub fn is_halted(&self) -> bool {
        self.halt_reason.is_some()
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.halt_reason = Some(reason);
    }

    /// Halt on a fault and report it as the step outcome
    pub fn fault(&mut self, fault: Fault) -> Step {
        self.halt(HaltReason::Fault(fault));
        Step::Fault(fault)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PC={:#04x} FL={:#010b}", self.pc, self.flags.bits())?;
        for reg in Register::ALL {
            write!(f, " {}={:#04x}", reg, self.read_reg(reg))?;
        }
        Ok(())
    }
}
