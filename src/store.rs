//! Build-time placement of string records.
//!
//! [`store!`](crate::store) emits a `#[used]` static holding the literal and a
//! trailing NUL, placed into a named link section. The linker concatenates
//! all such statics into one section, which [`crate::fetch`] later splits
//! back into records.

/// Stash a string literal into link section `$section`.
///
/// On ELF targets the record lands in section `$section`; on Apple targets in
/// section `$section` of the `__DATA_CONST` segment (Mach-O section names are
/// limited to 16 bytes). Evaluates to the record as `&'static [u8]`,
/// terminator included.
///
/// ```ignore
/// linkstash::store!("names", "alice");
/// let names = linkstash::fetch("names")?;
/// ```
#[macro_export]
macro_rules! store {
    ($section:literal, $value:literal) => {{
        const RECORD: &[u8] = ::core::concat!($value, "\0").as_bytes();
        #[used]
        #[cfg_attr(
            target_vendor = "apple",
            link_section = ::core::concat!("__DATA_CONST,", $section)
        )]
        #[cfg_attr(not(target_vendor = "apple"), link_section = $section)]
        static ENTRY: [u8; RECORD.len()] = $crate::__private::nul_terminated(RECORD);
        let entry: &'static [u8] = &ENTRY;
        entry
    }};
}

#[doc(hidden)]
pub mod __private {
    /// Copy `bytes` into a fixed-size array at compile time.
    pub const fn nul_terminated<const N: usize>(bytes: &[u8]) -> [u8; N] {
        assert!(bytes.len() == N && N > 0 && bytes[N - 1] == 0);
        let mut out = [0u8; N];
        let mut i = 0;
        while i < N {
            out[i] = bytes[i];
            i += 1;
        }
        out
    }
}
