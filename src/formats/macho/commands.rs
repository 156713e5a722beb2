//! Mach-O header, load command, segment and section records

use crate::error::{Result, StashError};
use crate::formats::macho::types::*;
use crate::io::ImageView;

/// Parse the Mach-O header at offset 0.
///
/// Only thin images are accepted; the width and byte order come from the
/// magic number.
pub fn parse_header(view: &ImageView<'_>) -> Result<MachHeader> {
    let magic = view.read(0, 4)?;
    let magic_be = u32::from_be_bytes([magic[0], magic[1], magic[2], magic[3]]);
    let magic_le = u32::from_le_bytes([magic[0], magic[1], magic[2], magic[3]]);

    if matches!(magic_be, FAT_MAGIC | FAT_MAGIC_64) {
        return Err(StashError::UnsupportedFormat(
            "fat Mach-O archives are not scanned".to_string(),
        ));
    }
    let (is_64, order) = match magic_le {
        MH_MAGIC_64 => (true, ByteOrder::Little),
        MH_MAGIC => (false, ByteOrder::Little),
        MH_CIGAM_64 => (true, ByteOrder::Big),
        MH_CIGAM => (false, ByteOrder::Big),
        _ => {
            return Err(StashError::UnsupportedFormat(format!(
                "unknown Mach-O magic {:#010x}",
                magic_be
            )))
        }
    };
    let layout = Layout { is_64, order };

    // magic, cputype, cpusubtype, filetype, ncmds, sizeofcmds, flags[, reserved]
    let raw = view.read(0, layout.header_size())?;
    Ok(MachHeader {
        layout,
        filetype: order.read_u32(raw, 12)?,
        ncmds: order.read_u32(raw, 16)?,
        sizeofcmds: order.read_u32(raw, 20)?,
    })
}

/// Read the generic `cmd`/`cmdsize` prefix at `offset`.
pub fn parse_load_command(
    view: &ImageView<'_>,
    offset: u64,
    order: ByteOrder,
) -> Result<LoadCommand> {
    let raw = view.read(offset, 8)?;
    let command = LoadCommand {
        cmd: order.read_u32(raw, 0)?,
        cmdsize: order.read_u32(raw, 4)?,
    };
    // A smaller size would leave the walk on the same command forever.
    if command.cmdsize < 8 {
        return Err(StashError::malformed(
            FORMAT,
            format!(
                "load command at {:#x} has cmdsize {}",
                offset, command.cmdsize
            ),
        ));
    }
    Ok(command)
}

/// Re-read the load command at `offset` as a full segment command.
pub fn parse_segment(view: &ImageView<'_>, offset: u64, layout: Layout) -> Result<SegmentCommand> {
    let raw = view.read(offset, layout.segment_command_size())?;
    let nsects_at = if layout.is_64 { 64 } else { 48 };
    Ok(SegmentCommand {
        segname: name_field(&raw[8..8 + NAME_LEN]),
        nsects: layout.order.read_u32(raw, nsects_at)?,
    })
}

/// Read the section record at `offset`.
pub fn parse_section(view: &ImageView<'_>, offset: u64, layout: Layout) -> Result<Section> {
    let raw = view.read(offset, layout.section_size())?;
    let order = layout.order;
    let (size, offset_at, flags_at) = if layout.is_64 {
        (order.read_u64(raw, 40)?, 48, 64)
    } else {
        (order.read_u32(raw, 36)? as u64, 40, 56)
    };
    Ok(Section {
        sectname: name_field(&raw[0..NAME_LEN]),
        segname: name_field(&raw[NAME_LEN..2 * NAME_LEN]),
        size,
        offset: order.read_u32(raw, offset_at)?,
        flags: order.read_u32(raw, flags_at)?,
    })
}

fn name_field(raw: &[u8]) -> [u8; NAME_LEN] {
    let mut name = [0u8; NAME_LEN];
    name.copy_from_slice(raw);
    name
}
