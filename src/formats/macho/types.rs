//! Mach-O constants and record layouts

/// Format label used in error messages.
pub(crate) const FORMAT: &str = "Mach-O";

pub const MH_MAGIC: u32 = 0xfeedface;
pub const MH_CIGAM: u32 = 0xcefaedfe; // swapped
pub const MH_MAGIC_64: u32 = 0xfeedfacf;
pub const MH_CIGAM_64: u32 = 0xcffaedfe; // swapped
pub const FAT_MAGIC: u32 = 0xcafebabe; // big-endian
pub const FAT_MAGIC_64: u32 = 0xcafebabf; // big-endian 64

/// Relocatable object file
pub const MH_OBJECT: u32 = 0x1;

pub const LC_SEGMENT: u32 = 0x1;
pub const LC_SEGMENT_64: u32 = 0x19;

/// Mask for the type byte of a section's `flags`
pub const SECTION_TYPE: u32 = 0x0000_00ff;
pub const S_ZEROFILL: u32 = 0x1;
pub const S_GB_ZEROFILL: u32 = 0xc;
pub const S_THREAD_LOCAL_ZEROFILL: u32 = 0x12;

/// Width of the fixed segment and section name fields
pub const NAME_LEN: usize = 16;

pub use crate::io::Endian as ByteOrder;

/// Record sizes for one pointer width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub is_64: bool,
    pub order: ByteOrder,
}

impl Layout {
    /// `mach_header` / `mach_header_64`
    pub fn header_size(&self) -> u64 {
        if self.is_64 {
            32
        } else {
            28
        }
    }

    /// `segment_command` / `segment_command_64`
    pub fn segment_command_size(&self) -> u64 {
        if self.is_64 {
            72
        } else {
            56
        }
    }

    /// `section` / `section_64`
    pub fn section_size(&self) -> u64 {
        if self.is_64 {
            80
        } else {
            68
        }
    }

    /// The segment load command kind matching this width
    pub fn segment_command(&self) -> u32 {
        if self.is_64 {
            LC_SEGMENT_64
        } else {
            LC_SEGMENT
        }
    }
}

/// The header fields needed to walk the load commands
#[derive(Debug, Clone, Copy)]
pub struct MachHeader {
    pub layout: Layout,
    pub filetype: u32,
    pub ncmds: u32,
    pub sizeofcmds: u32,
}

/// Generic load command prefix
#[derive(Debug, Clone, Copy)]
pub struct LoadCommand {
    pub cmd: u32,
    pub cmdsize: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct SegmentCommand {
    pub segname: [u8; NAME_LEN],
    pub nsects: u32,
}

impl SegmentCommand {
    pub fn name(&self) -> &[u8] {
        fixed_name(&self.segname)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub sectname: [u8; NAME_LEN],
    pub segname: [u8; NAME_LEN],
    pub size: u64,
    pub offset: u32,
    pub flags: u32,
}

impl Section {
    pub fn name(&self) -> &[u8] {
        fixed_name(&self.sectname)
    }

    pub fn segment_name(&self) -> &[u8] {
        fixed_name(&self.segname)
    }

    /// Whether the section occupies bytes in the file.
    pub fn has_file_data(&self) -> bool {
        !matches!(
            self.flags & SECTION_TYPE,
            S_ZEROFILL | S_GB_ZEROFILL | S_THREAD_LOCAL_ZEROFILL
        )
    }
}

/// A fixed-width name field up to its first NUL.
pub fn fixed_name(field: &[u8]) -> &[u8] {
    let end = memchr::memchr(0, field).unwrap_or(field.len());
    &field[..end]
}
