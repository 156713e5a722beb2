//! ELF (Executable and Linkable Format) section scanner
//!
//! A zero-copy reader that walks the section header table, resolves names
//! through the section-name string table and splits every section with the
//! requested name into its NUL-terminated records. Both classes (32/64-bit)
//! and both byte orders are handled.

pub mod headers;
pub mod sections;
pub mod types;
pub mod utils;

use crate::error::Result;
use crate::io::ImageView;
use headers::parse_header;
use sections::SectionTable;
use tracing::debug;
pub use types::*;

/// Parsed ELF image
pub struct ElfImage<'data> {
    view: ImageView<'data>,
    header: ElfHeader,
}

impl<'data> ElfImage<'data> {
    /// Parse the file header of the image behind `view`
    pub fn parse(view: &ImageView<'data>) -> Result<Self> {
        let header = parse_header(view)?;
        Ok(Self {
            view: *view,
            header,
        })
    }

    /// Get ELF header
    pub fn header(&self) -> &ElfHeader {
        &self.header
    }

    /// Get sections
    pub fn sections(&self) -> Result<SectionTable<'data>> {
        SectionTable::parse(&self.view, &self.header)
    }

    /// Records packed into every section called `name`.
    ///
    /// Sections sharing a name are all scanned, in table order; none are
    /// merged or skipped. `SHT_NOBITS` sections have no file bytes and
    /// contribute nothing.
    pub fn strings(&self, name: &str) -> Result<Vec<&'data [u8]>> {
        let sections = self.sections()?;
        let mut out = Vec::new();
        for section in sections.by_name(name.as_bytes())? {
            if !section.has_file_data() {
                debug!(section = name, "Skipping SHT_NOBITS section");
                continue;
            }
            debug!(
                section = name,
                offset = section.sh_offset,
                size = section.sh_size,
                "Scanning ELF section"
            );
            out.extend(self.view.strings_in(section.sh_offset, section.sh_size)?);
        }
        Ok(out)
    }
}

/// Every NUL-terminated record in the ELF sections named `name`.
pub fn scan<'data>(view: &ImageView<'data>, name: &str) -> Result<Vec<&'data [u8]>> {
    ElfImage::parse(view)?.strings(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, StashError};

    /// Little-endian ELF32 image with two sections named `names` and one
    /// `other`, laid out by hand.
    fn create_test_elf32() -> Vec<u8> {
        let mut data = vec![0u8; 0x200];
        data[0..4].copy_from_slice(ELF_MAGIC);
        data[4] = 1; // ELFCLASS32
        data[5] = 1; // ELFDATA2LSB
        data[6] = 1;

        // e_shoff = 0x40, e_shentsize = 40, e_shnum = 5, e_shstrndx = 4
        data[32] = 0x40;
        data[46] = 40;
        data[48] = 5;
        data[50] = 4;

        let strtab = b"\0names\0other\0.shstrtab\0";
        // (sh_name, sh_type, sh_offset, sh_size)
        let sections: [(u32, u32, u32, u32); 5] = [
            (0, SHT_NULL, 0, 0),
            (1, SHT_PROGBITS, 0x120, 10),
            (7, SHT_PROGBITS, 0x130, 4),
            (1, SHT_PROGBITS, 0x140, 8),
            (13, SHT_STRTAB, 0x180, strtab.len() as u32),
        ];
        for (i, (name, kind, offset, size)) in sections.iter().enumerate() {
            let at = 0x40 + i * 40;
            data[at..at + 4].copy_from_slice(&name.to_le_bytes());
            data[at + 4..at + 8].copy_from_slice(&kind.to_le_bytes());
            data[at + 16..at + 20].copy_from_slice(&offset.to_le_bytes());
            data[at + 20..at + 24].copy_from_slice(&size.to_le_bytes());
        }

        data[0x120..0x12a].copy_from_slice(b"alice\0bob\0");
        data[0x130..0x134].copy_from_slice(b"zed\0");
        data[0x140..0x148].copy_from_slice(b"charlie\0");
        data[0x180..0x180 + strtab.len()].copy_from_slice(strtab);
        data
    }

    #[test]
    fn test_scan_duplicate_sections_in_table_order() {
        let data = create_test_elf32();
        let found = scan(&ImageView::new(&data), "names").unwrap();
        assert_eq!(found, vec![&b"alice"[..], &b"bob"[..], &b"charlie"[..]]);
    }

    #[test]
    fn test_scan_other_and_absent_sections() {
        let data = create_test_elf32();
        let view = ImageView::new(&data);
        assert_eq!(scan(&view, "other").unwrap(), vec![&b"zed"[..]]);
        assert!(scan(&view, "absent-section").unwrap().is_empty());
    }

    #[test]
    fn test_zero_sized_section_contributes_nothing() {
        let mut data = create_test_elf32();
        // Section 2 ("other") size = 0
        data[0x40 + 2 * 40 + 20] = 0;
        assert!(scan(&ImageView::new(&data), "other").unwrap().is_empty());
    }

    #[test]
    fn test_nobits_section_contributes_nothing() {
        let mut data = create_test_elf32();
        data[0x40 + 2 * 40 + 4] = SHT_NOBITS as u8;
        assert!(scan(&ImageView::new(&data), "other").unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_final_record() {
        let mut data = create_test_elf32();
        // Drop the NUL after "bob"; the next byte in the file is also zero
        // but lies outside the section.
        data[0x129] = b'!';
        let err = scan(&ImageView::new(&data), "names").unwrap_err();
        assert!(matches!(err, StashError::UnterminatedString { offset: 0x126 }));
    }

    #[test]
    fn test_section_data_past_end_of_file() {
        let mut data = create_test_elf32();
        // Section 3 now runs past the end of the file
        data[0x40 + 3 * 40 + 21] = 0x10;
        let err = scan(&ImageView::new(&data), "names").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_not_elf() {
        let data = b"\xcf\xfa\xed\xfe not an ELF image";
        let err = scan(&ImageView::new(data), "names").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }
}
