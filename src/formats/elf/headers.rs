//! ELF header parsing

use crate::error::{Result, StashError};
use crate::formats::elf::types::*;
use crate::formats::elf::utils::{read_word, EndianRead};
use crate::io::ImageView;

/// Parse the ELF file header at offset 0.
pub fn parse_header(view: &ImageView<'_>) -> Result<ElfHeader> {
    let ident = view.read(0, EI_NIDENT as u64)?;

    // Check magic
    if &ident[0..4] != ELF_MAGIC {
        return Err(StashError::UnsupportedFormat(
            "missing ELF magic".to_string(),
        ));
    }

    let class = ElfClass::from_u8(ident[4])?;
    let endian = ElfData::from_u8(ident[5])?;

    let data = view.read(0, class.header_size() as u64)?;
    let (shoff_at, tail_at) = match class {
        ElfClass::Elf32 => (32, 46),
        ElfClass::Elf64 => (40, 58),
    };

    let e_shoff = read_word(data, shoff_at, class, endian)?;
    let e_shentsize = data.read_u16(tail_at, endian)?;
    let e_shnum = data.read_u16(tail_at + 2, endian)?;
    let e_shstrndx = data.read_u16(tail_at + 4, endian)?;

    if e_shoff != 0 && e_shentsize as usize != class.section_header_size() {
        return Err(StashError::malformed(
            FORMAT,
            format!(
                "invalid e_shentsize: expected {}, got {}",
                class.section_header_size(),
                e_shentsize
            ),
        ));
    }

    Ok(ElfHeader {
        class,
        data: endian,
        e_shoff,
        e_shentsize,
        e_shnum,
        e_shstrndx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn minimal_elf32_header() -> Vec<u8> {
        let mut data = vec![0u8; 52];
        // ELF magic
        data[0..4].copy_from_slice(b"\x7fELF");
        // 32-bit, little endian, version 1
        data[4] = 1; // ELFCLASS32
        data[5] = 1; // ELFDATA2LSB
        data[6] = 1; // EV_CURRENT

        // e_shoff = 0x34
        data[32] = 0x34;
        // e_shentsize = 40
        data[46] = 40;
        // e_shnum = 3
        data[48] = 3;
        // e_shstrndx = 2
        data[50] = 2;

        data
    }

    fn minimal_elf64_be_header() -> Vec<u8> {
        let mut data = vec![0u8; 64];
        data[0..4].copy_from_slice(b"\x7fELF");
        data[4] = 2; // ELFCLASS64
        data[5] = 2; // ELFDATA2MSB
        data[6] = 1;

        // e_shoff = 0x1000
        data[46] = 0x10;
        // e_shentsize = 64
        data[59] = 64;
        // e_shnum = 5
        data[61] = 5;
        // e_shstrndx = 4
        data[63] = 4;

        data
    }

    #[test]
    fn test_parse_elf32_header() {
        let data = minimal_elf32_header();
        let header = parse_header(&ImageView::new(&data)).unwrap();
        assert_eq!(header.class, ElfClass::Elf32);
        assert_eq!(header.data, ElfData::Little);
        assert_eq!(header.e_shoff, 0x34);
        assert_eq!(header.e_shentsize, 40);
        assert_eq!(header.e_shnum, 3);
        assert_eq!(header.e_shstrndx, 2);
    }

    #[test]
    fn test_parse_elf64_big_endian_header() {
        let data = minimal_elf64_be_header();
        let header = parse_header(&ImageView::new(&data)).unwrap();
        assert_eq!(header.class, ElfClass::Elf64);
        assert_eq!(header.data, ElfData::Big);
        assert_eq!(header.e_shoff, 0x1000);
        assert_eq!(header.e_shnum, 5);
        assert_eq!(header.e_shstrndx, 4);
    }

    #[test]
    fn test_invalid_magic() {
        let mut data = minimal_elf32_header();
        data[0] = 0xFF;
        let err = parse_header(&ImageView::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_invalid_class() {
        let mut data = minimal_elf32_header();
        data[4] = 7;
        let err = parse_header(&ImageView::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHeader);
    }

    #[test]
    fn test_bad_entry_size() {
        let mut data = minimal_elf32_header();
        data[46] = 64;
        let err = parse_header(&ImageView::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHeader);
    }

    #[test]
    fn test_truncated_header() {
        let data = vec![0x7f, b'E', b'L', b'F'];
        assert!(parse_header(&ImageView::new(&data))
            .unwrap_err()
            .is_out_of_bounds());

        let data = minimal_elf64_be_header();
        assert!(parse_header(&ImageView::new(&data[..40]))
            .unwrap_err()
            .is_out_of_bounds());
    }
}
