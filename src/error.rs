//! Error types for linkstash.
//!
//! Every failure along the fetch path is fatal to the call. A truncated or
//! malformed image aborts the whole scan instead of producing a partial list.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for linkstash operations.
#[derive(Debug, Error)]
pub enum StashError {
    /// The target file could not be opened for reading.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The length of the target file could not be determined.
    #[error("failed to determine size of {}: {source}", path.display())]
    Size {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The read-only mapping could not be established.
    #[error("failed to map {}: {source}", path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exceeds the configured view limit.
    #[error("{} is {size} bytes, exceeding the limit of {limit} bytes", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// A read or string lookup fell outside the mapped range.
    #[error("read of {size} bytes at offset {offset:#x} exceeds image length {len:#x}")]
    OutOfBounds { offset: u64, size: u64, len: u64 },

    /// No NUL byte was found before the end of the searched range.
    #[error("no NUL terminator for string at offset {offset:#x}")]
    UnterminatedString { offset: u64 },

    /// Header or table geometry is internally inconsistent.
    #[error("malformed {format} header: {reason}")]
    MalformedHeader { format: &'static str, reason: String },

    /// The image is not in a format this crate scans.
    #[error("unsupported object format: {0}")]
    UnsupportedFormat(String),

    /// The running binary's own path is unavailable.
    #[error("could not resolve the running binary's path: {0}")]
    PathResolution(#[source] std::io::Error),
}

/// Fieldless mirror of [`StashError`] for matching on the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Open,
    Size,
    Map,
    FileTooLarge,
    OutOfBounds,
    UnterminatedString,
    MalformedHeader,
    UnsupportedFormat,
    PathResolution,
}

impl StashError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StashError::Open { .. } => ErrorKind::Open,
            StashError::Size { .. } => ErrorKind::Size,
            StashError::Map { .. } => ErrorKind::Map,
            StashError::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            StashError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            StashError::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            StashError::MalformedHeader { .. } => ErrorKind::MalformedHeader,
            StashError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            StashError::PathResolution(_) => ErrorKind::PathResolution,
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.kind() == ErrorKind::OutOfBounds
    }

    pub(crate) fn malformed(format: &'static str, reason: impl Into<String>) -> Self {
        StashError::MalformedHeader {
            format,
            reason: reason.into(),
        }
    }
}

/// Result type alias for linkstash operations
pub type Result<T> = std::result::Result<T, StashError>;
