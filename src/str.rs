//! String length entry points.
//!
//! Slice functions treat the first zero byte as the terminator. If the slice
//! holds no zero byte, its length is returned and nothing past it is read.

#![allow(unsafe_code)]

use crate::scanner::Scanner;
use core::ffi::c_char;

const DEFAULT_SCANNER: Scanner = Scanner::word();

/// Calculate the length of a null-terminated string.
///
/// Uses the word strategy at the native chunk size.
///
/// # Examples
/// ```
/// use faststrlen::str::length_fast;
/// assert_eq!(length_fast(b"hello\0world"), 5);
/// assert_eq!(length_fast(b"\0"), 0);
/// assert_eq!(length_fast(b"hello"), 5); // no null terminator
/// ```
#[inline]
pub fn length_fast(s: &[u8]) -> usize {
    DEFAULT_SCANNER.length(s)
}

/// Calculate the length of a null-terminated string with a configured scanner.
///
/// # Examples
/// ```
/// use faststrlen::config::ScanConfig;
/// use faststrlen::scanner::Scanner;
/// use faststrlen::str::length_fast_with;
/// let scanner = Scanner::new(ScanConfig::vector());
/// assert_eq!(length_fast_with(&[0x41, 0xC3, 0x00], &scanner), 2);
/// ```
#[inline]
pub fn length_fast_with(s: &[u8], scanner: &Scanner) -> usize {
    scanner.length(s)
}

/// Calculate bounded length of a null-terminated string.
///
/// Returns the number of bytes before the first null byte, but at most
/// `maxlen`. Bytes at or past `maxlen` are never read.
///
/// # Examples
/// ```
/// use faststrlen::str::length_bounded;
/// assert_eq!(length_bounded(b"hello\0world", 10), 5);
/// assert_eq!(length_bounded(b"hello", 3), 3);
/// ```
#[inline]
pub fn length_bounded(s: &[u8], maxlen: usize) -> usize {
    let limit = s.len().min(maxlen);
    DEFAULT_SCANNER.length(&s[..limit])
}

/// Calculate the length of a C string.
///
/// # Safety
///
/// - `s` must point to a null-terminated string.
/// - At least 16 bytes past the terminator must be readable in the same
///   allocation, because the scan reads whole chunks.
#[inline]
pub unsafe fn length_fast_raw(s: *const c_char) -> usize {
    // SAFETY: forwarded caller contract.
    unsafe { DEFAULT_SCANNER.length_raw(s.cast::<u8>()) }
}
