//! Integration tests for the LS-8 runtime

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use ls8_loader::{encode_program, BinaryText, ProgramSource};
use ls8_runtime::{Fault, HaltReason, IOHandler, Output, VM, VMConfig};
use ls8_spec::{Instruction, Program, Register};

fn run(program: &Program) -> ls8_runtime::ExecutionResult {
    VM::new(program, VMConfig::default()).run().unwrap()
}

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_print8_from_source_text() {
    let program = BinaryText(
        "\
# print8.ls8
10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
"
        .to_string(),
    )
    .load()
    .unwrap();

    let result = run(&program);
    assert_eq!(result.output_text(), "8\n");
    assert_eq!(result.halt_reason, HaltReason::Halt);
}

#[test]
fn test_mult_outputs_72() {
    // LDI R0,8; LDI R1,9; MUL R0,R1; PRN R0; HLT
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R0, imm: 8 },
        Instruction::Ldi { reg: Register::R1, imm: 9 },
        Instruction::Mul { ra: Register::R0, rb: Register::R1 },
        Instruction::Prn { reg: Register::R0 },
        Instruction::Hlt,
    ])
    .unwrap();

    let result = run(&program);
    assert_eq!(result.outputs, vec![Output::Number(72)]);
    assert_eq!(result.output_text(), "72\n");
    assert_eq!(result.cycles, 5);
}

#[test]
fn test_push_pop_swaps_order() {
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R0, imm: 1 },
        Instruction::Ldi { reg: Register::R1, imm: 2 },
        Instruction::Push { reg: Register::R0 },
        Instruction::Push { reg: Register::R1 },
        Instruction::Pop { reg: Register::R2 },
        Instruction::Pop { reg: Register::R3 },
        Instruction::Hlt,
    ])
    .unwrap();

    let result = run(&program);
    assert_eq!(result.registers[Register::R2.index()], 2);
    assert_eq!(result.registers[Register::R3.index()], 1);
    assert_eq!(result.registers[Register::SP.index()], 0xF4);
}

#[test]
fn test_call_returns_to_next_instruction() {
    // 0: LDI R1,8
    // 3: CALL R1
    // 5: PRN R0
    // 7: HLT
    // 8: LDI R0,99
    // 11: RET
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R1, imm: 8 },
        Instruction::Call { reg: Register::R1 },
        Instruction::Prn { reg: Register::R0 },
        Instruction::Hlt,
        Instruction::Ldi { reg: Register::R0, imm: 99 },
        Instruction::Ret,
    ])
    .unwrap();

    let result = run(&program);
    assert_eq!(result.output_text(), "99\n");
    assert_eq!(result.cycles, 6);
    assert_eq!(result.registers[Register::SP.index()], 0xF4);
}

#[test]
fn test_conditional_jumps_follow_equal_flag() {
    // 0: LDI R0,5
    // 3: LDI R1,5
    // 6: LDI R2,19
    // 9: CMP R0,R1
    // 12: JNE R2   (not taken)
    // 14: JEQ R2   (taken)
    // 16: LDI R3,1 (skipped)
    // 19: PRN R1
    // 21: HLT
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R0, imm: 5 },
        Instruction::Ldi { reg: Register::R1, imm: 5 },
        Instruction::Ldi { reg: Register::R2, imm: 19 },
        Instruction::Cmp { ra: Register::R0, rb: Register::R1 },
        Instruction::Jne { reg: Register::R2 },
        Instruction::Jeq { reg: Register::R2 },
        Instruction::Ldi { reg: Register::R3, imm: 1 },
        Instruction::Prn { reg: Register::R1 },
        Instruction::Hlt,
    ])
    .unwrap();

    let config = VMConfig {
        enable_execution_trace: true,
        ..VMConfig::default()
    };
    let result = VM::new(&program, config).run().unwrap();

    assert_eq!(result.output_text(), "5\n");
    assert_eq!(result.registers[Register::R3.index()], 0);

    let pcs: Vec<u8> = result.execution_trace.iter().map(|row| row.pc).collect();
    assert_eq!(pcs, vec![0, 3, 6, 9, 12, 14, 19, 21]);
}

#[test]
fn test_countdown_loop() {
    // 0: LDI R0,3
    // 3: LDI R1,0
    // 6: LDI R2,9
    // 9: PRN R0
    // 11: DEC R0
    // 13: CMP R0,R1
    // 16: JNE R2
    // 18: HLT
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R0, imm: 3 },
        Instruction::Ldi { reg: Register::R1, imm: 0 },
        Instruction::Ldi { reg: Register::R2, imm: 9 },
        Instruction::Prn { reg: Register::R0 },
        Instruction::Dec { reg: Register::R0 },
        Instruction::Cmp { ra: Register::R0, rb: Register::R1 },
        Instruction::Jne { reg: Register::R2 },
        Instruction::Hlt,
    ])
    .unwrap();

    let result = run(&program);
    assert_eq!(result.output_text(), "3\n2\n1\n");
    assert!(result.halted_normally());
}

#[test]
fn test_mod_by_zero_halts_without_touching_dividend() {
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R0, imm: 10 },
        Instruction::Ldi { reg: Register::R1, imm: 0 },
        Instruction::Mod { ra: Register::R0, rb: Register::R1 },
        Instruction::Prn { reg: Register::R0 },
        Instruction::Hlt,
    ])
    .unwrap();

    let result = run(&program);
    assert_eq!(result.fault(), Some(Fault::DivisionByZero { pc: 6 }));
    assert_eq!(result.registers[Register::R0.index()], 10);
    assert_eq!(result.pc, 6);
    assert!(result.outputs.is_empty());
}

#[test]
fn test_unknown_opcode_faults_instead_of_looping() {
    // LDI R0,1; 0xFF
    let program = Program::from_bytes(vec![0x82, 0x00, 0x01, 0xFF]).unwrap();

    let result = run(&program);
    assert_eq!(
        result.halt_reason,
        HaltReason::Fault(Fault::InvalidOpcode { pc: 3, opcode: 0xFF })
    );
    assert_eq!(result.cycles, 2);
}

#[test]
fn test_cycle_limit_stops_infinite_loop() {
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R0, imm: 3 },
        Instruction::Jmp { reg: Register::R0 },
    ])
    .unwrap();

    let config = VMConfig {
        max_cycles: Some(1_000),
        ..VMConfig::default()
    };
    let result = VM::new(&program, config).run().unwrap();
    assert_eq!(result.halt_reason, HaltReason::CycleLimit);
    assert_eq!(result.cycles, 1_000);
}

#[test]
fn test_store_load_and_pra() {
    // Store "HI" at 0x80, read it back and print it as characters
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R0, imm: 0x80 },
        Instruction::Ldi { reg: Register::R1, imm: b'H' },
        Instruction::St { ra: Register::R0, rb: Register::R1 },
        Instruction::Inc { reg: Register::R0 },
        Instruction::Ldi { reg: Register::R1, imm: b'I' },
        Instruction::St { ra: Register::R0, rb: Register::R1 },
        Instruction::Ldi { reg: Register::R0, imm: 0x80 },
        Instruction::Ld { ra: Register::R2, rb: Register::R0 },
        Instruction::Pra { reg: Register::R2 },
        Instruction::Inc { reg: Register::R0 },
        Instruction::Ld { ra: Register::R2, rb: Register::R0 },
        Instruction::Pra { reg: Register::R2 },
        Instruction::Hlt,
    ])
    .unwrap();

    let result = run(&program);
    assert_eq!(result.output_text(), "HI");
}

#[test]
fn test_output_streams_to_sink() {
    let program = encode_program(&[
        Instruction::Ldi { reg: Register::R4, imm: 255 },
        Instruction::Prn { reg: Register::R4 },
        Instruction::Prn { reg: Register::R4 },
        Instruction::Hlt,
    ])
    .unwrap();

    let buf = SharedBuf::default();
    let vm = VM::with_io(&program, VMConfig::default(), IOHandler::with_sink(buf.clone()));
    let result = vm.run().unwrap();

    assert_eq!(String::from_utf8(buf.0.borrow().clone()).unwrap(), "255\n255\n");
    assert_eq!(result.output_text(), "255\n255\n");
}

#[test]
fn test_trace_logging_does_not_change_behavior() {
    let program = Program::from_bytes(vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]).unwrap();
    let config = VMConfig {
        trace: true,
        ..VMConfig::default()
    };
    let result = VM::new(&program, config).run().unwrap();
    assert_eq!(result.output_text(), "8\n");
}

#[test]
fn test_self_modifying_code() {
    // Overwrite the byte at 0x0B (the placeholder after ST) with HLT
    // 0: LDI R0,11
    // 3: LDI R1,1
    // 6: ST R0,R1
    // 9: PRN R1
    // 11: (0x00 placeholder, becomes HLT)
    let mut bytes = encode_program(&[
        Instruction::Ldi { reg: Register::R0, imm: 11 },
        Instruction::Ldi { reg: Register::R1, imm: 1 },
        Instruction::St { ra: Register::R0, rb: Register::R1 },
        Instruction::Prn { reg: Register::R1 },
    ])
    .unwrap()
    .into_bytes();
    bytes.push(0x00);

    let result = run(&Program::from_bytes(bytes).unwrap());
    assert!(result.halted_normally());
    assert_eq!(result.output_text(), "1\n");
}
