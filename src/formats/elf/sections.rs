//! Section table management

use crate::error::{Result, StashError};
use crate::formats::elf::types::*;
use crate::formats::elf::utils::{read_word, EndianRead};
use crate::io::ImageView;
use tracing::debug;

/// The section header table together with the section-name string table.
pub struct SectionTable<'data> {
    headers: Vec<SectionHeader>,
    // File offset of the section-name string table, if the image has one.
    names_offset: Option<u64>,
    view: ImageView<'data>,
}

impl<'data> SectionTable<'data> {
    /// Read the section header table described by `header`.
    ///
    /// Handles extended numbering: when `e_shnum` is zero the real count is in
    /// the first entry's `sh_size`, and when `e_shstrndx` is `SHN_XINDEX` the
    /// real index is in its `sh_link`.
    pub fn parse(view: &ImageView<'data>, header: &ElfHeader) -> Result<Self> {
        if header.e_shoff == 0 {
            // No sections
            return Ok(Self {
                headers: Vec::new(),
                names_offset: None,
                view: *view,
            });
        }

        let entsize = header.class.section_header_size() as u64;
        let needs_first = header.e_shnum == 0 || header.e_shstrndx == SHN_XINDEX;
        let first = if needs_first {
            let raw = view.read(header.e_shoff, entsize)?;
            parse_section_header(raw, header.class, header.data)?
        } else {
            SectionHeader::default()
        };

        let count = if header.e_shnum == 0 {
            first.sh_size
        } else {
            header.e_shnum as u64
        };
        let table_size = count.checked_mul(entsize).ok_or_else(|| {
            StashError::malformed(FORMAT, format!("section count {} overflows", count))
        })?;

        // One contiguous read for the whole table.
        let table = view.read(header.e_shoff, table_size)?;
        let headers = table
            .chunks_exact(entsize as usize)
            .map(|raw| parse_section_header(raw, header.class, header.data))
            .collect::<Result<Vec<_>>>()?;

        let shstrndx = if header.e_shstrndx == SHN_XINDEX {
            first.sh_link as u64
        } else {
            header.e_shstrndx as u64
        };
        let names_offset = if shstrndx == SHN_UNDEF as u64 {
            debug!("ELF image has no section-name string table");
            None
        } else {
            let strtab = headers.get(shstrndx as usize).ok_or_else(|| {
                StashError::malformed(
                    FORMAT,
                    format!(
                        "e_shstrndx {} out of range for {} sections",
                        shstrndx, count
                    ),
                )
            })?;
            Some(strtab.sh_offset)
        };

        debug!(
            count = headers.len(),
            table_offset = header.e_shoff,
            names_offset = ?names_offset,
            "Parsed ELF section table"
        );

        Ok(Self {
            headers,
            names_offset,
            view: *view,
        })
    }

    /// Count sections
    pub fn count(&self) -> usize {
        self.headers.len()
    }

    /// Get all section headers, in table order.
    pub fn headers(&self) -> &[SectionHeader] {
        &self.headers
    }

    /// Resolve a section's name through the section-name string table.
    ///
    /// Returns `None` when the image carries no such table.
    pub fn name_of(&self, section: &SectionHeader) -> Result<Option<&'data [u8]>> {
        match self.names_offset {
            Some(base) => {
                let at = base.checked_add(section.sh_name as u64).ok_or(
                    StashError::OutOfBounds {
                        offset: base,
                        size: section.sh_name as u64,
                        len: self.view.len(),
                    },
                )?;
                self.view.string_at(at).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Every section whose name equals `name`, in table order.
    ///
    /// Each entry's name is resolved, matching or not, so an unreadable name
    /// anywhere in the table fails the lookup.
    pub fn by_name(&self, name: &[u8]) -> Result<Vec<SectionHeader>> {
        let mut matches = Vec::new();
        for section in &self.headers {
            if self.name_of(section)? == Some(name) {
                matches.push(*section);
            }
        }
        Ok(matches)
    }
}

/// Parse a single section header
fn parse_section_header(raw: &[u8], class: ElfClass, endian: ElfData) -> Result<SectionHeader> {
    let (offset_at, size_at, link_at) = match class {
        ElfClass::Elf32 => (16, 20, 24),
        ElfClass::Elf64 => (24, 32, 40),
    };
    Ok(SectionHeader {
        sh_name: raw.read_u32(0, endian)?,
        sh_type: raw.read_u32(4, endian)?,
        sh_offset: read_word(raw, offset_at, class, endian)?,
        sh_size: read_word(raw, size_at, class, endian)?,
        sh_link: raw.read_u32(link_at, endian)?,
    })
}
