//! Incremental line reading over any number of streams at once.
//!
//! [`LineReader`] hands out one line per call from a readable source, including the terminator
//! byte when there is one. Bytes read past the end of a line are carried over to the next call
//! for the same source, so it does not matter how the source splits its data across reads, or how
//! large the read chunks are.
//!
//! Sources are told apart by their [`Handle`]. A single `LineReader` keeps an independent
//! carry-over buffer per handle and can be shared between threads.
//!
//! # Quick start
//!
//! ```
//! use line_buf_reader::{LineReader, Stream};
//! use std::io::Cursor;
//!
//! let reader = LineReader::new();
//! let mut first = Stream::new(1, Cursor::new(b"a1\na2\n"));
//! let mut second = Stream::new(2, Cursor::new(b"b1\nb2"));
//!
//! // Interleaved reads do not disturb each other
//! assert_eq!(reader.next_line(&mut first).unwrap().as_deref(), Some(&b"a1\n"[..]));
//! assert_eq!(reader.next_line(&mut second).unwrap().as_deref(), Some(&b"b1\n"[..]));
//! assert_eq!(reader.next_line(&mut first).unwrap().as_deref(), Some(&b"a2\n"[..]));
//! assert_eq!(reader.next_line(&mut second).unwrap().as_deref(), Some(&b"b2"[..]));
//!
//! // End of stream is `None`, not an error
//! assert_eq!(reader.next_line(&mut first).unwrap(), None);
//! assert_eq!(reader.next_line(&mut second).unwrap(), None);
//! ```
//!
//! # Configuration
//!
//! ```
//! use line_buf_reader::LineReader;
//!
//! let reader = LineReader::builder()
//!     .chunk_size(512)    // request 512 bytes per read
//!     .terminator(b';')   // lines end at ';'
//!     .build()
//!     .unwrap();
//!
//! // A zero chunk size is rejected up front
//! assert!(LineReader::builder().chunk_size(0).build().is_err());
//! ```
//!
//! # Crate organisation
//!
//! - [`LineReader`] — the primary type, holding per-handle state and driving the reads.
//! - [`LineReaderBuilder`] — configures chunk size and terminator before constructing a
//!   [`LineReader`].
//! - [`HandleRead`] — trait for a [`Read`](std::io::Read) that knows its [`Handle`]; [`Stream`]
//!   attaches a handle to any reader.
//! - [`Lines`] — iterator over the remaining lines of a source.
//! - [`buffer`] — the carry-over buffer and the scan/split helpers, for users who want to drive
//!   reads themselves.
//! - [`constants`] — defaults and limits ([`DEFAULT_CHUNK_SIZE`](constants::DEFAULT_CHUNK_SIZE),
//!   [`MAX_READ_COUNT`](constants::MAX_READ_COUNT)).

pub mod buffer;
pub mod constants;
mod error;
mod handle;
mod lines;
mod read;
mod reader;

pub use error::{Error, ErrorKind, Result};
pub use handle::Handle;
pub use lines::Lines;
pub use read::{HandleRead, Stream};
pub use reader::{LineReader, LineReaderBuilder};
