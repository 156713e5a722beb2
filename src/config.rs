//! Configuration for fetching stashed strings.

use serde::{Deserialize, Serialize};

/// Segment holding read-only initialized data in linked Mach-O images.
pub const DATA_CONST_SEGMENT: &str = "__DATA_CONST";

/// Resource limits applied when mapping a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewLimits {
    /// The absolute maximum file size that will be mapped.
    pub max_file_size: u64,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            max_file_size: 4 * 1024 * 1024 * 1024, // 4GiB
        }
    }
}

/// Configuration for a fetch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Limits for the mapped view.
    pub limits: ViewLimits,
    /// Mach-O segment whose sections are searched.
    pub macho_segment: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            limits: ViewLimits::default(),
            macho_segment: DATA_CONST_SEGMENT.to_string(),
        }
    }
}
