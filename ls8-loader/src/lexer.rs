//! # Lexers for LS-8 program text

use logos::Logos;

/// Tokens for `.ls8` binary program text
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Skip whitespace (not newlines)
pub enum Ls8Token {
    /// Binary literal, MSB first
    #[regex(r"[01]+", |lex| lex.slice().to_string(), priority = 3)]
    Binary(String),

    /// Comment running to end of line
    #[regex(r"#[^\n]*")]
    Comment,

    /// Any other run of non-blank text
    #[regex(r"[^ \t\r\f\n#]+", |lex| lex.slice().to_string(), priority = 1)]
    Text(String),

    /// Newline
    #[token("\n")]
    Newline,
}

/// Tokens for hex program text
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f,]+")] // Skip whitespace and commas (not newlines)
pub enum HexToken {
    /// Hex byte, with or without a `0x` prefix
    #[regex(r"(0[xX])?[0-9a-fA-F]+", |lex| lex.slice().to_string(), priority = 3)]
    Byte(String),

    /// Comment running to end of line
    #[regex(r"[#;][^\n]*")]
    Comment,

    /// Any other run of non-blank text
    #[regex(r"[^ \t\r\f\n,#;]+", |lex| lex.slice().to_string(), priority = 1)]
    Text(String),

    /// Newline
    #[token("\n")]
    Newline,
}
