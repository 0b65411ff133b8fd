//! Read-size and terminator constants.
//!
//! This module defines the defaults a [`LineReader`](crate::LineReader) is built with when the
//! [`LineReaderBuilder`](crate::LineReaderBuilder) is left untouched, plus the hard upper bound
//! that any configured chunk size is checked against.
//!
//! # Invariant
//!
//! The following relationships must hold between the constants:
//!
//! - `DEFAULT_CHUNK_SIZE` is a power of 2 and a multiple of 1 KiB (1024 bytes)
//! - `MAX_READ_COUNT > DEFAULT_CHUNK_SIZE`, so the default configuration is always valid
//!
//! A chunk size `n` is valid when `0 < n < MAX_READ_COUNT`.

/// Default number of bytes requested per read (8 KiB).
///
/// The size matches [`std::io::BufReader`]'s internal buffer size. Any value in the valid range
/// produces the same lines; this one only trades read-call overhead against peak memory held for
/// a pending line.
pub const DEFAULT_CHUNK_SIZE: usize =
    // 2^13 = 8192 = 8 * 1024 = 8 KiB
    1 << 13;

/// Default terminator byte.
pub const DEFAULT_TERMINATOR: u8 = b'\n';

/// The largest byte count a single read can report.
///
/// Slices never exceed `isize::MAX` bytes, so neither can a read into one. A configured chunk
/// size must be strictly below this value.
pub const MAX_READ_COUNT: usize = isize::MAX.unsigned_abs();
