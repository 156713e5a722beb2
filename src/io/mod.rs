//! Bounded, read-only views over file contents.
//!
//! [`MappedFile`] owns a read-only memory map of a whole file and releases it
//! on drop, on success and error paths alike. [`ImageView`] is the borrowed,
//! range-checked window the format scanners read through; it can also wrap an
//! in-memory buffer.

mod endian;

pub use endian::Endian;

use crate::config::ViewLimits;
use crate::error::{Result, StashError};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// A bounds-checked view over an object image.
///
/// Every access is validated against the image length; offsets and sizes are
/// checked without computing `offset + size`, so values near `u64::MAX` cannot
/// wrap around.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'data> {
    data: &'data [u8],
}

impl<'data> ImageView<'data> {
    pub fn new(data: &'data [u8]) -> Self {
        Self { data }
    }

    /// Length of the image in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'data [u8] {
        self.data
    }

    /// Returns exactly `size` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `StashError::OutOfBounds` if `offset > len` or
    /// `size > len - offset`.
    pub fn read(&self, offset: u64, size: u64) -> Result<&'data [u8]> {
        let len = self.len();
        if offset > len || size > len - offset {
            return Err(StashError::OutOfBounds { offset, size, len });
        }
        // Both values are now known to fit within the slice length.
        let start = offset as usize;
        Ok(&self.data[start..start + size as usize])
    }

    /// Returns the NUL-free run of bytes starting at `offset`, excluding the
    /// terminator.
    pub fn string_at(&self, offset: u64) -> Result<&'data [u8]> {
        let tail = self.read(offset, self.len() - offset.min(self.len()))?;
        match memchr::memchr(0, tail) {
            Some(end) => Ok(&tail[..end]),
            None => Err(StashError::UnterminatedString { offset }),
        }
    }

    /// Splits `[offset, offset + size)` into the NUL-terminated records packed
    /// inside it.
    ///
    /// Records are contiguous: each one starts right after the previous
    /// terminator. The terminator search never leaves the range, so a final
    /// record without a NUL is an error even if the file continues past it.
    pub fn strings_in(&self, offset: u64, size: u64) -> Result<Vec<&'data [u8]>> {
        let region = self.read(offset, size)?;
        let mut out = Vec::new();
        let mut cursor = 0usize;
        while cursor < region.len() {
            let rest = &region[cursor..];
            let end = memchr::memchr(0, rest).ok_or(StashError::UnterminatedString {
                offset: offset + cursor as u64,
            })?;
            trace!(offset = offset + cursor as u64, len = end, "Recovered record");
            out.push(&rest[..end]);
            cursor += end + 1;
        }
        Ok(out)
    }
}

/// A read-only memory map of an entire file.
pub struct MappedFile {
    path: PathBuf,
    // None when the file size is zero; memmap cannot map empty files.
    mmap: Option<Mmap>,
    size: u64,
}

impl MappedFile {
    /// Opens a file and maps its full contents read-only.
    ///
    /// Fails with `Open`, `Size`, `FileTooLarge` or `Map`, in that order of
    /// checking.
    pub fn open<P: AsRef<Path>>(path: P, limits: &ViewLimits) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StashError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let size = file
            .metadata()
            .map_err(|source| StashError::Size {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        debug!(
            path = %path.display(),
            size = size,
            limits.max_file_size = limits.max_file_size,
            "Mapping file"
        );

        if size > limits.max_file_size {
            warn!(
                path = %path.display(),
                size = size,
                limit = limits.max_file_size,
                "File is too large"
            );
            return Err(StashError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit: limits.max_file_size,
            });
        }

        let mmap = if size == 0 {
            None
        } else {
            // Safety: the map is read-only and private to this value. The
            // file may still be modified by another process; callers accept
            // that like any other reader of an executable on disk.
            let map = unsafe { Mmap::map(&file) }.map_err(|source| StashError::Map {
                path: path.to_path_buf(),
                source,
            })?;
            Some(map)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            size,
        })
    }

    /// Returns the size of the mapped file in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrow the mapping as a bounds-checked view.
    pub fn view(&self) -> ImageView<'_> {
        match &self.mmap {
            Some(map) => ImageView::new(map),
            None => ImageView::new(&[]),
        }
    }

    /// See [`ImageView::read`].
    pub fn read(&self, offset: u64, size: u64) -> Result<&[u8]> {
        self.view().read(offset, size)
    }

    /// See [`ImageView::string_at`].
    pub fn string_at(&self, offset: u64) -> Result<&[u8]> {
        self.view().string_at(offset)
    }
}
