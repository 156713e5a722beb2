//! Utility functions for ELF parsing

use crate::error::Result;
use crate::formats::elf::types::{ElfClass, ElfData};

/// Trait for reading values with endianness support
pub trait EndianRead {
    fn read_u16(&self, offset: usize, data: ElfData) -> Result<u16>;
    fn read_u32(&self, offset: usize, data: ElfData) -> Result<u32>;
    fn read_u64(&self, offset: usize, data: ElfData) -> Result<u64>;
}

impl EndianRead for [u8] {
    fn read_u16(&self, offset: usize, data: ElfData) -> Result<u16> {
        data.endian().read_u16(self, offset)
    }

    fn read_u32(&self, offset: usize, data: ElfData) -> Result<u32> {
        data.endian().read_u32(self, offset)
    }

    fn read_u64(&self, offset: usize, data: ElfData) -> Result<u64> {
        data.endian().read_u64(self, offset)
    }
}

/// Read an address- or offset-sized word based on ELF class
pub fn read_word(buf: &[u8], offset: usize, class: ElfClass, endian: ElfData) -> Result<u64> {
    match class {
        ElfClass::Elf32 => buf.read_u32(offset, endian).map(|v| v as u64),
        ElfClass::Elf64 => buf.read_u64(offset, endian),
    }
}
