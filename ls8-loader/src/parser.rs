//! Program text parsers

use logos::Logos;
use ls8_spec::Program;
use crate::error::{LoaderError, Result};
use crate::lexer::{HexToken, Ls8Token};

/// Widest accepted binary literal
const BYTE_DIGITS: usize = 8;

/// Parse `.ls8` text: each line starting with a binary literal contributes one
/// byte, every other line is skipped. Text after the literal is ignored, even
/// when it follows the digits without a separator (`10000010//LDI`).
pub fn parse_ls8(text: &str) -> Result<Program> {
    let mut program = Program::new();
    let mut lex = Ls8Token::lexer(text);
    let mut line = 1usize;
    let mut at_line_start = true;

    while let Some(token) = lex.next() {
        match token {
            Ok(Ls8Token::Newline) => {
                line += 1;
                at_line_start = true;
            }
            Ok(Ls8Token::Binary(literal)) if at_line_start => {
                let byte = parse_binary_literal(line, &literal)?;
                push_byte(&mut program, line, byte)?;
                at_line_start = false;
            }
            Ok(Ls8Token::Text(word)) if at_line_start => {
                let digits = binary_prefix(&word);
                if !digits.is_empty() {
                    let byte = parse_binary_literal(line, digits)?;
                    push_byte(&mut program, line, byte)?;
                }
                at_line_start = false;
            }
            Ok(_) => at_line_start = false,
            Err(()) => {
                return Err(LoaderError::UnexpectedInput {
                    line,
                    text: lex.slice().to_string(),
                });
            }
        }
    }

    Ok(program)
}

/// Parse hex text: whitespace or comma separated bytes, `#`/`;` comments.
pub fn parse_hex(text: &str) -> Result<Program> {
    let mut program = Program::new();
    let mut lex = HexToken::lexer(text);
    let mut line = 1usize;

    while let Some(token) = lex.next() {
        match token {
            Ok(HexToken::Newline) => line += 1,
            Ok(HexToken::Comment) => {}
            Ok(HexToken::Byte(token)) => {
                let byte = parse_hex_byte(line, &token)?;
                push_byte(&mut program, line, byte)?;
            }
            Ok(HexToken::Text(token)) => {
                return Err(LoaderError::InvalidHexByte { line, token });
            }
            Err(()) => {
                return Err(LoaderError::UnexpectedInput {
                    line,
                    text: lex.slice().to_string(),
                });
            }
        }
    }

    Ok(program)
}

/// Parse a binary literal of at most 8 digits
pub fn parse_binary_literal(line: usize, literal: &str) -> Result<u8> {
    if literal.len() > BYTE_DIGITS {
        return Err(LoaderError::LiteralTooWide {
            line,
            literal: literal.to_string(),
        });
    }
    u8::from_str_radix(literal, 2).map_err(|_| LoaderError::UnexpectedInput {
        line,
        text: literal.to_string(),
    })
}

/// Leading run of `0`/`1` digits
fn binary_prefix(word: &str) -> &str {
    let end = word
        .find(|c: char| c != '0' && c != '1')
        .unwrap_or(word.len());
    &word[..end]
}

fn parse_hex_byte(line: usize, token: &str) -> Result<u8> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    u8::from_str_radix(digits, 16).map_err(|_| LoaderError::InvalidHexByte {
        line,
        token: token.to_string(),
    })
}

fn push_byte(program: &mut Program, line: usize, byte: u8) -> Result<()> {
    program
        .extend_from_slice(&[byte])
        .map_err(|source| LoaderError::Image { line, source })
}
