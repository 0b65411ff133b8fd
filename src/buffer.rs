//! Carry-over buffer and the byte helpers line extraction is built on.
//!
//! The [`CarryOver`] type holds bytes that were read from a stream but not yet handed out as part
//! of a line. It is used as the per-handle state of [`LineReader`](crate::LineReader), but works
//! standalone for callers who want to drive the reads themselves.
//!
//! # Example
//!
//! ```
//! use line_buf_reader::buffer::{CarryOver, FillResult, Terminator};
//! use std::io::Cursor;
//!
//! let mut reader = Cursor::new(b"key=value\nother");
//! let mut carry = CarryOver::new();
//!
//! // Read one chunk
//! carry.reserve(4).unwrap();
//! let result = carry.fill(&mut reader, 4).unwrap();
//! assert_eq!(result, FillResult::Complete(4));
//! assert_eq!(carry.scan(b'\n'), Terminator::Missing);
//!
//! // Read until the terminator shows up
//! while let Terminator::Missing = carry.scan(b'\n') {
//!     carry.reserve(4).unwrap();
//!     carry.fill(&mut reader, 4).unwrap();
//! }
//!
//! // Hand out the line, keep the rest
//! let at = carry.scan(b'\n');
//! let line = carry.take_line(at).unwrap();
//! assert_eq!(line, b"key=value\n");
//! assert_eq!(carry.buf(), b"ot");
//! ```

use crate::error::{Error, Result};
use std::io::{self, Read};
use std::mem;

/// Result of a single chunk read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillResult {
    /// The reader produced data.
    ///
    /// Contains the byte count.
    Complete(usize),

    /// The reader reported end-of-file by returning zero bytes.
    Eof,
}

impl FillResult {
    /// Returns the byte count, `0` for [`Eof`](Self::Eof).
    ///
    /// # Examples
    ///
    /// ```
    /// # use line_buf_reader::buffer::FillResult;
    /// assert_eq!(FillResult::Complete(42).count(), 42);
    /// assert_eq!(FillResult::Eof.count(), 0);
    /// ```
    pub const fn count(&self) -> usize {
        match self {
            Self::Complete(n) => *n,
            Self::Eof => 0,
        }
    }
}

/// Position of the first terminator byte in a buffer.
///
/// This has exactly two states. There is no third "found at the end of the data" answer: the
/// logical end of a buffer is not a terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// The terminator is at this index.
    At(usize),

    /// The buffer contains no terminator.
    Missing,
}

impl Terminator {
    /// Returns the length of the line in a buffer of `len` bytes.
    ///
    /// That is one past the terminator when there is one, or the whole buffer when there is
    /// not. The result never exceeds `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use line_buf_reader::buffer::Terminator;
    /// assert_eq!(Terminator::At(3).line_end(10), 4);
    /// assert_eq!(Terminator::Missing.line_end(10), 10);
    /// ```
    pub const fn line_end(self, len: usize) -> usize {
        match self {
            Self::At(i) if i < len => i.saturating_add(1),
            Self::At(_) | Self::Missing => len,
        }
    }

    /// Returns `true` if a terminator was found.
    pub const fn is_found(self) -> bool {
        matches!(self, Self::At(_))
    }
}

/// Finds the first `terminator` byte in `haystack`.
///
/// # Examples
///
/// ```
/// # use line_buf_reader::buffer::{find_terminator, Terminator};
/// assert_eq!(find_terminator(b"ab\ncd\n", b'\n'), Terminator::At(2));
/// assert_eq!(find_terminator(b"abcd", b'\n'), Terminator::Missing);
/// assert_eq!(find_terminator(b"", b'\n'), Terminator::Missing);
/// ```
#[inline]
pub fn find_terminator(haystack: &[u8], terminator: u8) -> Terminator {
    haystack
        .iter()
        .position(|&b| b == terminator)
        .map_or(Terminator::Missing, Terminator::At)
}

/// Copies up to `len` bytes of `source` starting at `start` into a new vector.
///
/// Both `start` and `len` are clamped to what `source` actually holds, so asking for more than is
/// there yields whatever is available, and starting past the end yields an empty vector.
///
/// # Examples
///
/// ```
/// # use line_buf_reader::buffer::extract;
/// assert_eq!(extract(b"Hello, World!", 7, 5).unwrap(), b"World");
/// assert_eq!(extract(b"Hello, World!", 7, 100).unwrap(), b"World!");
/// assert_eq!(extract(b"Hello", 100, 1).unwrap(), b"");
/// ```
///
/// # Errors
///
/// Returns [`Error::Allocation`] if the new vector cannot be allocated.
pub fn extract(source: &[u8], start: usize, len: usize) -> Result<Vec<u8>> {
    let tail = source.get(start..).unwrap_or_default();
    let bytes = tail.get(..len).unwrap_or(tail);

    let mut out = Vec::new();
    out.try_reserve_exact(bytes.len())
        .map_err(|e| Error::allocation(bytes.len(), e))?;
    out.extend_from_slice(bytes);

    Ok(out)
}

/// Splits `source` into the line ending at `at` and the remainder after it.
///
/// `source` is consumed. The line is a fresh allocation sized to fit; the remainder reuses the
/// storage of `source`, with the line's bytes removed from its front.
///
/// | source        | line     | remainder |
/// |---------------|----------|-----------|
/// | `""`          | `""`     | `""`      |
/// | `"\nab"`      | `"\n"`   | `"ab"`    |
/// | `"ab\ncd"`    | `"ab\n"` | `"cd"`    |
/// | `"ab"`        | `"ab"`   | `""`      |
///
/// # Examples
///
/// ```
/// # use line_buf_reader::buffer::{split, find_terminator};
/// let source = b"abc\ndef".to_vec();
/// let at = find_terminator(&source, b'\n');
/// let (line, remainder) = split(source, at).unwrap();
/// assert_eq!(line, b"abc\n");
/// assert_eq!(remainder, b"def");
/// ```
///
/// # Errors
///
/// Returns [`Error::Allocation`] if the line cannot be allocated. `source` is released in that
/// case.
pub fn split(mut source: Vec<u8>, at: Terminator) -> Result<(Vec<u8>, Vec<u8>)> {
    let end = at.line_end(source.len());
    let line = extract(&source, 0, end)?;

    // Move the remainder to the front of the existing storage
    source.drain(..end);

    Ok((line, source))
}

/// Bytes read from a stream but not yet returned as part of a line.
///
/// A `CarryOver` only ever exposes its logical contents: space reserved for a read that the
/// reader did not fill is trimmed before [`fill`](Self::fill) returns, so a terminator scan never
/// sees stale or padding bytes.
///
/// The buffer remembers how much of its contents are already known to be free of the terminator,
/// so repeated [`scan`](Self::scan)s between reads only look at newly appended bytes.
///
/// # Invariants
///
/// `0 <= scanned <= buf.len()` whenever no scan is in progress, and `buf[..scanned]` contains no
/// `scanned_for` byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarryOver {
    /// Logical contents.
    buf: Vec<u8>,
    /// Length of the prefix already scanned without finding a terminator.
    scanned: usize,
    /// Terminator the `scanned` prefix was searched for.
    scanned_for: u8,
}

impl CarryOver {
    /// Creates an empty buffer. Nothing is allocated until data arrives.
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            scanned: 0,
            scanned_for: 0,
        }
    }

    /// Returns the buffered bytes.
    #[inline]
    pub fn buf(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of buffered bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of bytes the buffer can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Drops all buffered bytes and releases the storage.
    #[inline]
    pub fn discard(&mut self) {
        self.buf = Vec::new();
        self.scanned = 0;
    }

    /// Reserves room for at least `additional` more bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the memory cannot be acquired. The buffer is unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.buf
            .try_reserve(additional)
            .map_err(|e| Error::allocation(additional, e))
    }

    /// Appends `chunk` to the buffered bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use line_buf_reader::buffer::CarryOver;
    /// let mut carry = CarryOver::new();
    /// carry.append(b"ab").unwrap();
    /// carry.append(b"c\n").unwrap();
    /// assert_eq!(carry.buf(), b"abc\n");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the buffer cannot grow. The buffer is unchanged.
    pub fn append(&mut self, chunk: &[u8]) -> Result<()> {
        self.reserve(chunk.len())?;
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    /// Reads a single chunk of at most `chunk_size` bytes from `reader` and appends it.
    ///
    /// Reads interrupted by a signal ([`io::ErrorKind::Interrupted`]) are retried; any other
    /// error is returned as is. Either way the buffered bytes are left exactly as before the
    /// call, except for any data the reader produced.
    ///
    /// Call [`reserve`](Self::reserve) first to surface allocation failure as an error, as this
    /// method grows the buffer infallibly.
    ///
    /// # Examples
    ///
    /// ```
    /// # use line_buf_reader::buffer::{CarryOver, FillResult};
    /// # use std::io::Cursor;
    /// let mut carry = CarryOver::new();
    /// let mut reader = Cursor::new(b"Hello, World!");
    ///
    /// assert_eq!(carry.fill(&mut reader, 5).unwrap(), FillResult::Complete(5));
    /// assert_eq!(carry.buf(), b"Hello");
    ///
    /// assert_eq!(carry.fill(&mut reader, 100).unwrap(), FillResult::Complete(8));
    /// assert_eq!(carry.fill(&mut reader, 100).unwrap(), FillResult::Eof);
    /// assert_eq!(carry.buf(), b"Hello, World!");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than `Interrupted` encountered while reading.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Both terms are below isize::MAX, so the sum fits in usize"
    )]
    pub fn fill(&mut self, mut reader: impl Read, chunk_size: usize) -> io::Result<FillResult> {
        let start = self.buf.len();

        // Expose a zeroed read area past the logical end
        self.buf.resize(start + chunk_size, 0);

        // Read once, retrying on interrupt
        let result = loop {
            match reader.read(&mut self.buf[start..]) {
                Ok(n) => break Ok(n.min(chunk_size)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => break Err(e),
            }
        };

        // Trim the read area back to what was actually read
        let bytes_read = *result.as_ref().unwrap_or(&0);
        self.buf.truncate(start + bytes_read);

        match result? {
            0 => Ok(FillResult::Eof),
            n => Ok(FillResult::Complete(n)),
        }
    }

    /// Finds the first `terminator` byte in the buffered bytes.
    ///
    /// Only bytes appended since the last scan for the same terminator that came up empty are
    /// examined.
    ///
    /// # Examples
    ///
    /// ```
    /// # use line_buf_reader::buffer::{CarryOver, Terminator};
    /// let mut carry = CarryOver::new();
    /// carry.append(b"abc").unwrap();
    /// assert_eq!(carry.scan(b'\n'), Terminator::Missing);
    ///
    /// carry.append(b"d\nef").unwrap();
    /// assert_eq!(carry.scan(b'\n'), Terminator::At(4));
    /// ```
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The index is within the buffer, so the sum is too"
    )]
    pub fn scan(&mut self, terminator: u8) -> Terminator {
        let from = if terminator == self.scanned_for {
            self.scanned.min(self.buf.len())
        } else {
            0
        };
        let unscanned = self.buf.get(from..).unwrap_or_default();

        match find_terminator(unscanned, terminator) {
            Terminator::At(i) => Terminator::At(from + i),
            Terminator::Missing => {
                self.scanned = self.buf.len();
                self.scanned_for = terminator;
                Terminator::Missing
            }
        }
    }

    /// Removes and returns the line ending at `at`, keeping the remainder buffered.
    ///
    /// `at` should come from [`scan`](Self::scan) on the current contents. Passing
    /// [`Terminator::Missing`] takes everything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the line cannot be allocated. All buffered bytes are
    /// dropped in that case.
    pub fn take_line(&mut self, at: Terminator) -> Result<Vec<u8>> {
        let source = mem::take(&mut self.buf);
        self.scanned = 0;

        let (line, remainder) = split(source, at)?;
        self.buf = remainder;

        Ok(line)
    }
}
