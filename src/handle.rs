use std::fmt;

/// Identifier of a readable byte source.
///
/// A handle is the key a [`LineReader`](crate::LineReader) files carry-over state under. On Unix
/// it is usually the raw file descriptor of the source, but any caller-chosen number works as long
/// as distinct live sources get distinct handles.
///
/// Negative handles are invalid and are rejected before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(i64);

impl Handle {
    /// Wraps a raw identifier.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Returns `true` if the handle passes the basic validity check (non-negative).
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for Handle {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<i32> for Handle {
    fn from(raw: i32) -> Self {
        Self(i64::from(raw))
    }
}
