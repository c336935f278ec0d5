//! Instruction formatting for LS-8 listings and `.ls8` source text

use ls8_spec::Instruction;

/// Format instruction as assembly text, e.g. `LDI R0,8`
pub fn format(instr: &Instruction) -> String {
    instr.to_string()
}

/// Format a byte as an 8-digit binary literal, MSB first
pub fn format_binary(byte: u8) -> String {
    format!("{:08b}", byte)
}

/// Format raw bytes as space-separated hex, padded to a fixed column width
pub fn format_hex_bytes(bytes: &[u8]) -> String {
    let hex: Vec<String> = bytes.iter().map(|b| format!("{:02X}", b)).collect();
    format!("{:<8}", hex.join(" "))
}

/// Render an encoded instruction as `.ls8` source lines.
///
/// The opcode line carries the mnemonic as a `#` comment so the output reads
/// like a hand-written program file.
pub fn format_ls8_lines(instr: &Instruction) -> Vec<String> {
    let mut lines = Vec::with_capacity(instr.width());
    lines.push(format!("{} # {}", format_binary(instr.opcode().to_u8()), format(instr)));
    for operand in instr.operands() {
        lines.push(format_binary(operand));
    }
    lines
}
