//! Object format scanners.
//!
//! Both scanners are plain byte parsers and are compiled on every host, so an
//! ELF image can be inspected on macOS and vice versa. Only
//! [`ObjectFormat::native`] (and with it [`crate::fetch()`]) depends on the
//! target.

pub mod elf;
pub mod macho;

use crate::config::FetchConfig;
use crate::error::Result;
use crate::io::ImageView;

/// Object file format of an executable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectFormat {
    Elf,
    MachO,
}

impl ObjectFormat {
    /// The format the running platform links its executables in.
    #[cfg(target_vendor = "apple")]
    pub const fn native() -> Self {
        ObjectFormat::MachO
    }

    /// The format the running platform links its executables in.
    #[cfg(all(unix, not(target_vendor = "apple"), not(target_os = "aix")))]
    pub const fn native() -> Self {
        ObjectFormat::Elf
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObjectFormat::Elf => elf::types::FORMAT,
            ObjectFormat::MachO => macho::types::FORMAT,
        }
    }

    /// Every NUL-terminated record stored in section `name` of the image.
    ///
    /// Records come back in the order their sections appear in the header
    /// table (ELF) or load command list (Mach-O), then by ascending offset
    /// within each section.
    pub fn scan<'data>(
        self,
        view: &ImageView<'data>,
        name: &str,
        config: &FetchConfig,
    ) -> Result<Vec<&'data [u8]>> {
        match self {
            ObjectFormat::Elf => elf::scan(view, name),
            ObjectFormat::MachO => macho::scan(view, &config.macho_segment, name),
        }
    }
}
