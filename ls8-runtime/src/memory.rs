//! Memory subsystem
//!
//! 256 bytes of RAM shared by code, data and the stack. Addresses are `u8`, so
//! every access is in bounds and address arithmetic wraps.

use ls8_spec::{Program, ENTRY_POINT, MEMORY_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zero-filled memory
    pub fn new() -> Self {
        Memory {
            data: [0; MEMORY_SIZE],
        }
    }

    #[inline]
    pub fn read(&self, addr: u8) -> u8 {
        self.data[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u8, value: u8) {
        self.data[addr as usize] = value;
    }

    /// Copy a program image to the entry point. Bytes past the image are left
    /// untouched.
    pub fn load_program(&mut self, program: &Program) {
        let start = ENTRY_POINT as usize;
        let bytes = program.as_bytes();
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
    }

    /// Fill `buf` with the bytes starting at `addr`, wrapping at the end of
    /// memory
    pub fn read_wrapping(&self, addr: u8, buf: &mut [u8]) {
        for (offset, slot) in buf.iter_mut().enumerate() {
            *slot = self.read(addr.wrapping_add(offset as u8));
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
