//! LS-8 Program Loader
//!
//! Turn program files into byte images for the CPU core.
//!
//! ## Example
//!
//! ```rust
//! use ls8_loader::{BinaryText, ProgramSource};
//!
//! let source = BinaryText(r#"
//!     # print8.ls8
//!     10000010 # LDI R0,8
//!     00000000
//!     00001000
//!     01000111 # PRN R0
//!     00000000
//!     00000001 # HLT
//! "#.to_string());
//!
//! let program = source.load().unwrap();
//! assert_eq!(program.len(), 6);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod encoder;
pub mod source;

pub use error::{LoaderError, Result};
pub use parser::{parse_hex, parse_ls8};
pub use encoder::{encode, encode_program};
pub use source::{BinaryText, FileSource, HexText, ProgramSource, RawBytes, SourceFormat};

/// Load a program file, inferring the format from its extension
pub fn load_file(path: impl Into<std::path::PathBuf>) -> Result<ls8_spec::Program> {
    FileSource::new(path).load()
}
