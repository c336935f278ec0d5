//! # LS-8 Disassembler
//!
//! Decode LS-8 byte images into instructions and human-readable listings.
//!
//! The [`decode`] function is shared with the runtime: the CPU core decodes
//! every fetched instruction through it, so listings and execution always
//! agree on the meaning of a byte sequence.
//!
//! ## Example
//!
//! ```rust
//! use ls8_spec::Program;
//! use ls8_disassembler::disassemble;
//!
//! let program = Program::from_bytes(vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]).unwrap();
//! let asm = disassemble(&program);
//! assert!(asm.contains("LDI R0,8"));
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::{disassemble, listing, to_ls8_source, ListingLine};
pub use decoder::{decode, decode_at};
pub use formatter::format;
