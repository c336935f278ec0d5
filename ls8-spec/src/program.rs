//! # Program Image for LS-8
//!
//! A program is the raw byte image copied into memory starting at
//! [`ENTRY_POINT`](crate::ENTRY_POINT). There is no header: code and data
//! share the same bytes.

use crate::error::Ls8Error;
use crate::MEMORY_SIZE;
use std::fmt;

/// Complete program image
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Create a program from an image, rejecting images larger than memory
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Ls8Error> {
        let program = Self { bytes };
        program.validate()?;
        Ok(program)
    }

    /// Validate the image fits in the address space
    pub fn validate(&self) -> Result<(), Ls8Error> {
        if self.bytes.len() > MEMORY_SIZE {
            return Err(Ls8Error::ProgramTooLarge {
                capacity: MEMORY_SIZE,
                found: self.bytes.len(),
            });
        }
        Ok(())
    }

    /// Image bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the program, returning its image
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Image size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Append bytes, failing if the image would overflow memory
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), Ls8Error> {
        let found = self.bytes.len() + bytes.len();
        if found > MEMORY_SIZE {
            return Err(Ls8Error::ProgramTooLarge {
                capacity: MEMORY_SIZE,
                found,
            });
        }
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

impl TryFrom<Vec<u8>> for Program {
    type Error = Ls8Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Program::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for Program {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LS-8 Program")?;
        writeln!(f, "  Size:  {} bytes", self.bytes.len())?;
        writeln!(f, "  Free:  {} bytes", MEMORY_SIZE - self.bytes.len().min(MEMORY_SIZE))?;
        Ok(())
    }
}
