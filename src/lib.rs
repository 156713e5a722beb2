//! Recover strings stashed into a named section of an executable at build
//! time.
//!
//! Producers anywhere in a program place string literals into a named link
//! section with [`store!`]. At runtime [`fetch()`] maps the executable's own
//! image from disk, finds every section with that name and returns the
//! NUL-terminated records packed inside, in the order the linker laid them
//! out. There is no registry and no startup-time initialization.
//!
//! ```ignore
//! fn register() {
//!     linkstash::store!("names", "alice");
//! }
//!
//! let names = linkstash::fetch("names")?;
//! assert!(names.contains(&"alice".to_string()));
//! ```
//!
//! ELF images are scanned on ELF platforms and Mach-O images on Apple
//! platforms. The scanners themselves ([`formats::elf`], [`formats::macho`])
//! work on any host through [`fetch_as`] or directly over an [`ImageView`].

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Reading stored records back from an executable
pub mod fetch;
/// Object format scanners
pub mod formats;
/// Bounded file views
pub mod io;
/// Tracing subscriber setup
pub mod logging;
/// Build-time placement of records
pub mod store;

#[doc(hidden)]
pub use store::__private;

pub use config::{FetchConfig, ViewLimits, DATA_CONST_SEGMENT};
pub use error::{ErrorKind, Result, StashError};
pub use fetch::{current_binary_path, fetch_as, fetch_bytes_as};
#[cfg(all(unix, not(target_os = "aix")))]
pub use fetch::{fetch, fetch_bytes, fetch_from, fetch_with};
pub use formats::ObjectFormat;
pub use io::{ImageView, MappedFile};
