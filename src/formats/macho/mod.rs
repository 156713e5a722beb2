//! Mach-O section scanner
//!
//! Walks the load command list of a thin Mach-O image, looks for the segment
//! holding read-only initialized data and splits the requested section of
//! that segment into its NUL-terminated records.

pub mod commands;
pub mod types;

use crate::error::{Result, StashError};
use crate::io::ImageView;
use commands::{parse_header, parse_load_command, parse_section, parse_segment};
use tracing::{debug, trace};
pub use types::*;

/// Parsed Mach-O image
pub struct MachImage<'data> {
    view: ImageView<'data>,
    header: MachHeader,
}

impl<'data> MachImage<'data> {
    pub fn parse(view: &ImageView<'data>) -> Result<Self> {
        let header = parse_header(view)?;
        Ok(Self {
            view: *view,
            header,
        })
    }

    pub fn header(&self) -> &MachHeader {
        &self.header
    }

    /// Every section named `name` inside segments named `segment`, in load
    /// command order.
    ///
    /// Relocatable objects (`MH_OBJECT`) keep all sections in one unnamed
    /// segment; there each section's own segment name is compared instead.
    pub fn sections(&self, segment: &str, name: &str) -> Result<Vec<Section>> {
        let layout = self.header.layout;
        let is_object = self.header.filetype == MH_OBJECT;
        let mut matches = Vec::new();
        let mut offset = layout.header_size();
        let commands_end = layout.header_size() + self.header.sizeofcmds as u64;

        for _ in 0..self.header.ncmds {
            let command = parse_load_command(&self.view, offset, layout.order)?;
            let next = offset + command.cmdsize as u64;
            if next > commands_end {
                return Err(StashError::malformed(
                    FORMAT,
                    format!(
                        "load command at {:#x} ends at {:#x}, past sizeofcmds end {:#x}",
                        offset, next, commands_end
                    ),
                ));
            }
            if command.cmd == layout.segment_command() {
                let seg = parse_segment(&self.view, offset, layout)?;
                check_section_count(&seg, &command, layout, offset)?;
                let anonymous = is_object && seg.name().is_empty();
                trace!(
                    segment = %String::from_utf8_lossy(seg.name()),
                    nsects = seg.nsects,
                    "Visiting segment"
                );
                if seg.name() == segment.as_bytes() || anonymous {
                    let mut at = offset + layout.segment_command_size();
                    for _ in 0..seg.nsects {
                        let section = parse_section(&self.view, at, layout)?;
                        let in_segment =
                            !anonymous || section.segment_name() == segment.as_bytes();
                        if in_segment && section.name() == name.as_bytes() {
                            matches.push(section);
                        }
                        at += layout.section_size();
                    }
                }
            }
            // Unrecognized commands are skipped by their declared size.
            offset = next;
        }
        Ok(matches)
    }

    /// Records packed into section `name` of segment `segment`.
    pub fn strings(&self, segment: &str, name: &str) -> Result<Vec<&'data [u8]>> {
        let mut out = Vec::new();
        for section in self.sections(segment, name)? {
            if !section.has_file_data() {
                debug!(section = name, "Skipping zero-fill section");
                continue;
            }
            debug!(
                segment = segment,
                section = name,
                offset = section.offset,
                size = section.size,
                "Scanning Mach-O section"
            );
            out.extend(self.view.strings_in(section.offset as u64, section.size)?);
        }
        Ok(out)
    }
}

/// The section records of a segment must fit inside its own command.
fn check_section_count(
    seg: &SegmentCommand,
    command: &LoadCommand,
    layout: Layout,
    offset: u64,
) -> Result<()> {
    let needed = (seg.nsects as u64)
        .checked_mul(layout.section_size())
        .and_then(|size| size.checked_add(layout.segment_command_size()));
    match needed {
        Some(needed) if needed <= command.cmdsize as u64 => Ok(()),
        _ => Err(StashError::malformed(
            FORMAT,
            format!(
                "segment at {:#x} declares {} sections but cmdsize is {}",
                offset, seg.nsects, command.cmdsize
            ),
        )),
    }
}

/// Every NUL-terminated record in section `name` of segment `segment`.
pub fn scan<'data>(
    view: &ImageView<'data>,
    segment: &str,
    name: &str,
) -> Result<Vec<&'data [u8]>> {
    MachImage::parse(view)?.strings(segment, name)
}
