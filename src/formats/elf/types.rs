//! Core ELF types and constants

use crate::error::{Result, StashError};
use crate::io::Endian;

/// Format label used in error messages.
pub(crate) const FORMAT: &str = "ELF";

/// ELF magic number
pub const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Size of `e_ident`.
pub const EI_NIDENT: usize = 16;

/// ELF class (32-bit or 64-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfClass {
    Elf32 = 1,
    Elf64 = 2,
}

impl ElfClass {
    pub fn from_u8(val: u8) -> Result<Self> {
        match val {
            1 => Ok(ElfClass::Elf32),
            2 => Ok(ElfClass::Elf64),
            _ => Err(StashError::malformed(
                FORMAT,
                format!("unsupported class {}", val),
            )),
        }
    }

    /// Size of the file header (`e_ehsize`).
    pub fn header_size(&self) -> usize {
        match self {
            ElfClass::Elf32 => 52,
            ElfClass::Elf64 => 64,
        }
    }

    /// Size of one section header entry (`e_shentsize`).
    pub fn section_header_size(&self) -> usize {
        match self {
            ElfClass::Elf32 => 40,
            ElfClass::Elf64 => 64,
        }
    }
}

/// ELF data encoding (endianness)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfData {
    Little = 1,
    Big = 2,
}

impl ElfData {
    pub fn from_u8(val: u8) -> Result<Self> {
        match val {
            1 => Ok(ElfData::Little),
            2 => Ok(ElfData::Big),
            _ => Err(StashError::malformed(
                FORMAT,
                format!("unsupported data encoding {}", val),
            )),
        }
    }

    pub fn is_little_endian(&self) -> bool {
        matches!(self, ElfData::Little)
    }

    pub fn endian(self) -> Endian {
        match self {
            ElfData::Little => Endian::Little,
            ElfData::Big => Endian::Big,
        }
    }
}

/// The parts of the ELF file header needed to reach the section table.
#[derive(Debug, Clone, Copy)]
pub struct ElfHeader {
    pub class: ElfClass,
    pub data: ElfData,
    pub e_shoff: u64,
    pub e_shentsize: u16,
    pub e_shnum: u16,
    pub e_shstrndx: u16,
}

/// Section header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionHeader {
    pub sh_name: u32,
    pub sh_type: u32,
    pub sh_offset: u64,
    pub sh_size: u64,
    pub sh_link: u32,
}

impl SectionHeader {
    /// Whether the section occupies bytes in the file.
    pub fn has_file_data(&self) -> bool {
        self.sh_type != SHT_NOBITS
    }
}

/// Section types
pub const SHT_NULL: u32 = 0;
pub const SHT_PROGBITS: u32 = 1;
pub const SHT_STRTAB: u32 = 3;
pub const SHT_NOBITS: u32 = 8;

/// Special section indices
pub const SHN_UNDEF: u16 = 0;
pub const SHN_XINDEX: u16 = 0xffff;
