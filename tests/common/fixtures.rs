//! Object file fixtures.

use object::write::Object;
use object::{Architecture, BinaryFormat, Endianness, SectionKind};
use object::{Object as _, ObjectSection as _};

/// One section to emit: `(segment, section name, data chunks)`.
///
/// Chunks are appended with alignment 1, so they end up packed back to back
/// like the contributions of several translation units.
pub type SectionDef<'a> = (&'a str, &'a str, &'a [&'a [u8]]);

/// Target description for a fixture.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub format: BinaryFormat,
    pub arch: Architecture,
    pub endian: Endianness,
}

pub const ELF64_LE: Target = Target {
    format: BinaryFormat::Elf,
    arch: Architecture::X86_64,
    endian: Endianness::Little,
};

pub const ELF32_LE: Target = Target {
    format: BinaryFormat::Elf,
    arch: Architecture::I386,
    endian: Endianness::Little,
};

pub const ELF32_BE: Target = Target {
    format: BinaryFormat::Elf,
    arch: Architecture::Mips,
    endian: Endianness::Big,
};

pub const MACHO64: Target = Target {
    format: BinaryFormat::MachO,
    arch: Architecture::X86_64,
    endian: Endianness::Little,
};

pub const MACHO64_ARM: Target = Target {
    format: BinaryFormat::MachO,
    arch: Architecture::Aarch64,
    endian: Endianness::Little,
};

pub const MACHO32: Target = Target {
    format: BinaryFormat::MachO,
    arch: Architecture::I386,
    endian: Endianness::Little,
};

/// Write a relocatable object containing `sections`.
pub fn build_object(target: Target, sections: &[SectionDef<'_>]) -> Vec<u8> {
    let mut obj = Object::new(target.format, target.arch, target.endian);
    for (segment, name, chunks) in sections {
        let id = obj.add_section(
            segment.as_bytes().to_vec(),
            name.as_bytes().to_vec(),
            SectionKind::ReadOnlyData,
        );
        for chunk in chunks.iter() {
            obj.append_section_data(id, chunk, 1);
        }
    }
    obj.write().unwrap()
}

/// NUL-terminated record bytes for each value.
pub fn records(values: &[&str]) -> Vec<Vec<u8>> {
    values
        .iter()
        .map(|value| {
            let mut bytes = value.as_bytes().to_vec();
            bytes.push(0);
            bytes
        })
        .collect()
}

/// Records in every section called `name`, read back through `object::read`.
///
/// Used as an independent reference for the scanners' output.
pub fn reference_records(image: &[u8], segment: &str, name: &str) -> Vec<String> {
    let file = object::File::parse(image).unwrap();
    let mut out = Vec::new();
    for section in file.sections() {
        if section.name().ok() != Some(name) {
            continue;
        }
        if file.format() == BinaryFormat::MachO && section.segment_name().ok() != Some(Some(segment)) {
            continue;
        }
        let data = section.data().unwrap();
        let mut rest = data;
        while !rest.is_empty() {
            let end = rest.iter().position(|&b| b == 0).unwrap();
            out.push(String::from_utf8_lossy(&rest[..end]).into_owned());
            rest = &rest[end + 1..];
        }
    }
    out
}
