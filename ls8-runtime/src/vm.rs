//! Virtual Machine for LS-8

use tracing::{debug, info, trace};

use crate::error::Result;
use crate::execute::execute;
use crate::io::{render, IOHandler, Output};
use crate::state::{Fault, HaltReason, Machine, Step};
use crate::trace::TraceRow;
use ls8_disassembler::DisassemblerError;
use ls8_spec::{Instruction, Opcode, Program, MAX_INSTRUCTION_WIDTH, NUM_REGISTERS};

/// VM configuration
#[derive(Debug, Clone, Default)]
pub struct VMConfig {
    /// Maximum number of cycles before halting, unlimited when `None`
    pub max_cycles: Option<u64>,

    /// Log every executed instruction at `trace` level
    pub trace: bool,

    /// Collect a [`TraceRow`] per executed instruction
    pub enable_execution_trace: bool,
}

/// Execution result
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Number of cycles executed
    pub cycles: u64,

    /// Values emitted by PRN/PRA, in order
    pub outputs: Vec<Output>,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Execution trace (if execution tracing enabled)
    pub execution_trace: Vec<TraceRow>,

    /// Final register file
    pub registers: [u8; NUM_REGISTERS],

    /// Final program counter
    pub pc: u8,

    /// Final flags
    pub flags: u8,
}

impl ExecutionResult {
    /// Program output as it appeared on the console
    pub fn output_text(&self) -> String {
        render(&self.outputs)
    }

    /// The fault that stopped the machine, if any
    pub fn fault(&self) -> Option<Fault> {
        match self.halt_reason {
            HaltReason::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Check if the program stopped on HLT
    pub fn halted_normally(&self) -> bool {
        self.halt_reason == HaltReason::Halt
    }
}

/// LS-8 Virtual Machine
#[derive(Debug)]
pub struct VM {
    /// Registers, PC, flags and memory
    machine: Machine,

    /// I/O handler
    io: IOHandler,

    /// Configuration
    config: VMConfig,

    /// Execution trace (if enabled)
    execution_trace: Vec<TraceRow>,
}

impl VM {
    /// Create a VM with a program loaded, collecting output in memory
    pub fn new(program: &Program, config: VMConfig) -> Self {
        Self::with_io(program, config, IOHandler::new())
    }

    /// Create a VM that emits output through `io`
    pub fn with_io(program: &Program, config: VMConfig, io: IOHandler) -> Self {
        let machine = Machine::with_program(program);

        debug!(bytes = program.len(), "program loaded");

        Self {
            machine,
            io,
            config,
            execution_trace: Vec::new(),
        }
    }

    /// Run one fetch-decode-execute step.
    ///
    /// Once the machine has stopped every further call returns
    /// [`Step::Halted`] without touching state.
    pub fn step(&mut self) -> Result<Step> {
        if self.machine.is_halted() {
            return Ok(Step::Halted);
        }

        if let Some(max) = self.config.max_cycles {
            if self.machine.cycles >= max {
                debug!(cycles = self.machine.cycles, "cycle limit reached");
                self.machine.halt(HaltReason::CycleLimit);
                return Ok(Step::Halted);
            }
        }

        let pc = self.machine.pc;
        let opcode = self.machine.ram_read(pc);
        // Two high bits name up to three operands, even for undefined opcodes
        let mut buf = [0u8; MAX_INSTRUCTION_WIDTH];
        let operands = &mut buf[..Opcode::operand_count_of(opcode)];
        self.machine.memory.read_wrapping(pc.wrapping_add(1), operands);
        let operands = &*operands;

        self.machine.cycles += 1;
        let cycle = self.machine.cycles - 1;

        let instr = match self.decode(pc, opcode, operands) {
            Ok(instr) => instr,
            Err(fault) => {
                debug!(cycle, %fault, "machine fault");
                return Ok(self.machine.fault(fault));
            }
        };

        if self.config.trace {
            trace!(cycle, pc, "{}", instr);
        }

        if self.config.enable_execution_trace {
            self.execution_trace.push(TraceRow {
                cycle,
                pc,
                opcode,
                operands: operands.to_vec(),
                registers: self.machine.registers,
                flags: self.machine.flags.bits(),
            });
        }

        let step = execute(&instr, &mut self.machine, &mut self.io)?;

        match step {
            Step::Halted => info!(cycles = self.machine.cycles, "halted"),
            Step::Fault(fault) => debug!(cycle, %fault, "machine fault"),
            Step::Continue => {}
        }

        Ok(step)
    }

    /// Run the VM until it halts, faults or exhausts its cycle budget
    pub fn run(mut self) -> Result<ExecutionResult> {
        while self.step()? == Step::Continue {}

        self.io.flush()?;

        Ok(ExecutionResult {
            cycles: self.machine.cycles,
            outputs: self.io.take_outputs(),
            halt_reason: self.machine.halt_reason.unwrap_or(HaltReason::Halt),
            execution_trace: self.execution_trace,
            registers: self.machine.registers,
            pc: self.machine.pc,
            flags: self.machine.flags.bits(),
        })
    }

    fn decode(&self, pc: u8, opcode: u8, operands: &[u8]) -> std::result::Result<Instruction, Fault> {
        ls8_disassembler::decode(opcode, operands).map_err(|e| match e {
            DisassemblerError::InvalidRegister { index, .. } => {
                Fault::InvalidRegister { pc, opcode, index }
            }
            DisassemblerError::UnknownOpcode(_) | DisassemblerError::Truncated { .. } => {
                Fault::InvalidOpcode { pc, opcode }
            }
        })
    }

    /// Get machine state (for debugging)
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn io(&self) -> &IOHandler {
        &self.io
    }

    /// Rows collected so far
    pub fn execution_trace(&self) -> &[TraceRow] {
        &self.execution_trace
    }
}
