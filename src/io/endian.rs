//! Endian-aware fixed-width reads over raw record bytes

use crate::error::{Result, StashError};

/// Byte order of the integers in an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    pub fn read_u16(self, buf: &[u8], offset: usize) -> Result<u16> {
        let bytes = field::<2>(buf, offset)?;
        Ok(match self {
            Endian::Little => u16::from_le_bytes(bytes),
            Endian::Big => u16::from_be_bytes(bytes),
        })
    }

    pub fn read_u32(self, buf: &[u8], offset: usize) -> Result<u32> {
        let bytes = field::<4>(buf, offset)?;
        Ok(match self {
            Endian::Little => u32::from_le_bytes(bytes),
            Endian::Big => u32::from_be_bytes(bytes),
        })
    }

    pub fn read_u64(self, buf: &[u8], offset: usize) -> Result<u64> {
        let bytes = field::<8>(buf, offset)?;
        Ok(match self {
            Endian::Little => u64::from_le_bytes(bytes),
            Endian::Big => u64::from_be_bytes(bytes),
        })
    }
}

fn field<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    buf.get(offset..)
        .and_then(|tail| tail.get(..N))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(StashError::OutOfBounds {
            offset: offset as u64,
            size: N as u64,
            len: buf.len() as u64,
        })
}
