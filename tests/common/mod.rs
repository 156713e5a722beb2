//! Common test utilities and helpers.
//!
//! Fixtures are real object files produced by the `object` crate's writer,
//! so the scanners are exercised against layouts a toolchain would emit.

#![allow(dead_code)]

pub mod fixtures;

use std::io::Write;
use tempfile::NamedTempFile;

/// Creates a temporary file with the given content.
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file
}

/// Owned strings from string literals, for comparing against fetch results.
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
