//! Error types for line reading.
//!
//! End of stream is not represented here: [`LineReader::next_line`](crate::LineReader::next_line)
//! reports it as `Ok(None)`. Everything in this module is a failure.

use crate::handle::Handle;
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A failure while configuring a reader or producing a line.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured chunk size is zero or not below
    /// [`MAX_READ_COUNT`](crate::constants::MAX_READ_COUNT).
    #[error("invalid chunk size {chunk_size}: must be between 1 and {max} exclusive")]
    InvalidConfiguration {
        /// The rejected chunk size.
        chunk_size: usize,
        /// The exclusive upper bound.
        max: usize,
    },

    /// The stream handle failed its validity check.
    #[error("invalid stream handle {0}")]
    InvalidHandle(Handle),

    /// Growing or copying a buffer could not acquire memory.
    #[error("failed to allocate {requested} bytes of line buffer")]
    Allocation {
        /// Number of additional bytes that were requested.
        requested: usize,
        /// The allocator's report.
        #[source]
        source: TryReserveError,
    },

    /// The underlying read reported an error.
    #[error("read from stream handle {handle} failed")]
    Read {
        /// Handle the read was issued against.
        handle: Handle,
        /// The error returned by the reader.
        #[source]
        source: io::Error,
    },
}

/// Classification of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidConfiguration`].
    InvalidConfiguration,
    /// See [`Error::InvalidHandle`].
    InvalidHandle,
    /// See [`Error::Allocation`].
    AllocationFailure,
    /// See [`Error::Read`].
    ReadFailure,
}

impl Error {
    /// Returns the kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            Self::InvalidHandle(_) => ErrorKind::InvalidHandle,
            Self::Allocation { .. } => ErrorKind::AllocationFailure,
            Self::Read { .. } => ErrorKind::ReadFailure,
        }
    }

    pub(crate) fn allocation(requested: usize, source: TryReserveError) -> Self {
        Self::Allocation { requested, source }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match error.kind() {
            ErrorKind::InvalidConfiguration => io::ErrorKind::InvalidInput,
            ErrorKind::InvalidHandle => io::ErrorKind::InvalidInput,
            ErrorKind::AllocationFailure => io::ErrorKind::OutOfMemory,
            ErrorKind::ReadFailure => match &error {
                Error::Read { source, .. } => source.kind(),
                _ => io::ErrorKind::Other,
            },
        };
        io::Error::new(kind, error)
    }
}
