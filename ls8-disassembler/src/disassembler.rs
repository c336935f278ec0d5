//! Main disassembler logic

use ls8_spec::{Opcode, Program};
use crate::decoder::decode_at;
use crate::error::DisassemblerError;
use crate::formatter::{format, format_binary, format_hex_bytes, format_ls8_lines};

/// One decoded entry of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    /// Address of the first byte
    pub address: u8,
    /// Raw bytes covered by this entry
    pub bytes: Vec<u8>,
    /// Assembly text, or the reason the bytes did not decode
    pub decoded: Result<String, DisassemblerError>,
}

/// Walk a program image linearly, decoding one instruction at a time.
///
/// Bytes that fail to decode are emitted as single-byte data entries and the
/// walk resumes at the next byte.
pub fn listing(program: &Program) -> Vec<ListingLine> {
    let bytes = program.as_bytes();
    let mut lines = Vec::new();
    let mut addr = 0usize;

    while addr < bytes.len() {
        match decode_at(bytes, addr) {
            Ok(instr) => {
                let width = instr.width();
                lines.push(ListingLine {
                    address: addr as u8,
                    bytes: bytes[addr..addr + width].to_vec(),
                    decoded: Ok(format(&instr)),
                });
                addr += width;
            }
            Err(err) => {
                lines.push(ListingLine {
                    address: addr as u8,
                    bytes: vec![bytes[addr]],
                    decoded: Err(err),
                });
                addr += 1;
            }
        }
    }

    lines
}

/// Disassemble a program into listing text
pub fn disassemble(program: &Program) -> String {
    let mut output = String::new();

    output.push_str("; LS-8 Disassembly\n");
    output.push_str(&format!("; Image size: {} bytes\n", program.len()));
    output.push('\n');

    for line in listing(program) {
        output.push_str(&format!("0x{:02X}:  ", line.address));
        output.push_str(&format_hex_bytes(&line.bytes));
        output.push_str("  ");

        let byte = line.bytes[0];
        match line.decoded {
            Ok(text) => output.push_str(&text),
            Err(DisassemblerError::Truncated { opcode, .. }) => {
                let name = Opcode::from_u8(opcode).map_or("?", Opcode::mnemonic);
                output.push_str(&format!("; {} (truncated)", name));
            }
            Err(DisassemblerError::InvalidRegister { index, .. }) => {
                output.push_str(&format!(".byte 0x{:02X} ; bad register {}", byte, index));
            }
            Err(DisassemblerError::UnknownOpcode(_)) => {
                output.push_str(&format!(".byte 0x{:02X}", byte));
            }
        }

        output.push('\n');
    }

    output
}

/// Render a program as `.ls8` source text: one binary literal per line, with
/// decoded mnemonics as comments.
pub fn to_ls8_source(program: &Program) -> String {
    let bytes = program.as_bytes();
    let mut output = String::new();
    let mut addr = 0usize;

    while addr < bytes.len() {
        match decode_at(bytes, addr) {
            Ok(instr) => {
                for line in format_ls8_lines(&instr) {
                    output.push_str(&line);
                    output.push('\n');
                }
                addr += instr.width();
            }
            Err(_) => {
                output.push_str(&format_binary(bytes[addr]));
                output.push('\n');
                addr += 1;
            }
        }
    }

    output
}
