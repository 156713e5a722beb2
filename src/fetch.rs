//! Fetch stashed strings from an executable image on disk.
//!
//! Each call maps the file, scans it and drops the mapping before returning.
//! Nothing is cached between calls, so concurrent fetches against the same
//! or different files share no state.

use crate::config::FetchConfig;
use crate::error::{Result, StashError};
use crate::formats::ObjectFormat;
use crate::io::MappedFile;
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span};

/// Path of the running binary, as reported by the OS.
pub fn current_binary_path() -> Result<PathBuf> {
    std::env::current_exe().map_err(StashError::PathResolution)
}

/// Raw records of section `name` in the `format` image at `path`.
///
/// This is the format-explicit core every other fetch goes through; it is
/// available on all hosts.
pub fn fetch_bytes_as<P: AsRef<Path>>(
    format: ObjectFormat,
    name: &str,
    path: P,
    config: &FetchConfig,
) -> Result<Vec<Vec<u8>>> {
    let path = path.as_ref();
    let _span = debug_span!(
        "fetch",
        section = name,
        path = %path.display(),
        format = format.name()
    )
    .entered();

    let file = MappedFile::open(path, &config.limits)?;
    let records = format.scan(&file.view(), name, config)?;
    debug!(count = records.len(), "Fetched records");
    Ok(records.into_iter().map(<[u8]>::to_vec).collect())
}

/// Strings of section `name` in the `format` image at `path`.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD; use
/// [`fetch_bytes_as`] for the exact bytes.
pub fn fetch_as<P: AsRef<Path>>(
    format: ObjectFormat,
    name: &str,
    path: P,
    config: &FetchConfig,
) -> Result<Vec<String>> {
    Ok(fetch_bytes_as(format, name, path, config)?
        .into_iter()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .collect())
}

/// Strings stashed in section `name` of the running binary.
#[cfg(all(unix, not(target_os = "aix")))]
pub fn fetch(name: &str) -> Result<Vec<String>> {
    fetch_from(name, current_binary_path()?)
}

/// Strings stashed in section `name` of the binary at `path`.
#[cfg(all(unix, not(target_os = "aix")))]
pub fn fetch_from<P: AsRef<Path>>(name: &str, path: P) -> Result<Vec<String>> {
    fetch_with(name, path, &FetchConfig::default())
}

/// [`fetch_from`] with an explicit configuration.
#[cfg(all(unix, not(target_os = "aix")))]
pub fn fetch_with<P: AsRef<Path>>(
    name: &str,
    path: P,
    config: &FetchConfig,
) -> Result<Vec<String>> {
    fetch_as(ObjectFormat::native(), name, path, config)
}

/// Raw records stashed in section `name` of the binary at `path`.
#[cfg(all(unix, not(target_os = "aix")))]
pub fn fetch_bytes<P: AsRef<Path>>(name: &str, path: P) -> Result<Vec<Vec<u8>>> {
    fetch_bytes_as(ObjectFormat::native(), name, path, &FetchConfig::default())
}
