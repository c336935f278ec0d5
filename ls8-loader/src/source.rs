//! Program sources
//!
//! A [`ProgramSource`] produces the byte image the CPU core executes. The core
//! never sees the on-disk format, so new formats plug in here without touching
//! execution.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ls8_spec::Program;
use crate::error::{LoaderError, Result};
use crate::parser::{parse_hex, parse_ls8};

/// Anything that can hand the CPU a program image
pub trait ProgramSource {
    /// Produce the program image
    fn load(&self) -> Result<Program>;
}

/// On-disk program formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// `.ls8` text, one binary literal per line
    #[default]
    Binary,
    /// Hex text, whitespace or comma separated
    Hex,
    /// Raw byte image
    Raw,
}

impl SourceFormat {
    /// Guess the format from a file extension, defaulting to binary text
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("hex") => SourceFormat::Hex,
            Some("bin") | Some("rom") => SourceFormat::Raw,
            _ => SourceFormat::Binary,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::Binary => "binary",
            SourceFormat::Hex => "hex",
            SourceFormat::Raw => "raw",
        }
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "ls8" => Ok(SourceFormat::Binary),
            "hex" => Ok(SourceFormat::Hex),
            "raw" | "bin" => Ok(SourceFormat::Raw),
            other => Err(format!("unknown program format `{}`", other)),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `.ls8` binary text held in memory
#[derive(Debug, Clone)]
pub struct BinaryText(pub String);

impl ProgramSource for BinaryText {
    fn load(&self) -> Result<Program> {
        parse_ls8(&self.0)
    }
}

/// Hex text held in memory
#[derive(Debug, Clone)]
pub struct HexText(pub String);

impl ProgramSource for HexText {
    fn load(&self) -> Result<Program> {
        parse_hex(&self.0)
    }
}

/// Raw byte image held in memory
#[derive(Debug, Clone)]
pub struct RawBytes(pub Vec<u8>);

impl ProgramSource for RawBytes {
    fn load(&self) -> Result<Program> {
        Ok(Program::from_bytes(self.0.clone())?)
    }
}

/// Program file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: SourceFormat,
}

impl FileSource {
    /// File source with the format inferred from the extension
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SourceFormat::from_path(&path);
        Self { path, format }
    }

    /// File source with an explicit format
    pub fn with_format(path: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    fn read_text(&self) -> Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|_| LoaderError::NotText {
            path: self.path.clone(),
        })
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|source| LoaderError::Open {
            path: self.path.clone(),
            source,
        })
    }
}

impl ProgramSource for FileSource {
    fn load(&self) -> Result<Program> {
        let program = match self.format {
            SourceFormat::Binary => parse_ls8(&self.read_text()?)?,
            SourceFormat::Hex => parse_hex(&self.read_text()?)?,
            SourceFormat::Raw => Program::from_bytes(self.read_bytes()?)?,
        };

        tracing::debug!(
            path = %self.path.display(),
            format = %self.format,
            bytes = program.len(),
            "loaded program"
        );

        Ok(program)
    }
}
