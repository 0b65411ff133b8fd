use crate::buffer::{CarryOver, FillResult, Terminator};
use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_TERMINATOR, MAX_READ_COUNT};
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::lines::Lines;
use crate::read::HandleRead;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace, warn};

type Slot = Arc<Mutex<CarryOver>>;

/// Reads lines from any number of streams, one carry-over buffer per [`Handle`].
///
/// Each call to [`next_line`](Self::next_line) reads from the source in chunks of
/// [`chunk_size`](Self::chunk_size) bytes until the buffered bytes contain a terminator or the
/// source reports end of stream, then hands out everything up to and including the first
/// terminator. Whatever was read past it is kept for the next call on the same handle.
///
/// A `LineReader` is `Send + Sync`. Calls for distinct handles run in parallel; calls for the
/// same handle are serialized.
#[derive(Debug)]
pub struct LineReader {
    slots: DashMap<Handle, Slot>,
    chunk_size: usize,
    terminator: u8,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    /// Creates a `LineReader` with the default configuration.
    ///
    /// Reads are [`DEFAULT_CHUNK_SIZE`] bytes and lines end at [`DEFAULT_TERMINATOR`].
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            terminator: DEFAULT_TERMINATOR,
        }
    }

    /// Returns a [`LineReaderBuilder`] for configuring a new `LineReader`.
    pub fn builder() -> LineReaderBuilder {
        LineReaderBuilder {
            chunk_size: DEFAULT_CHUNK_SIZE,
            terminator: DEFAULT_TERMINATOR,
        }
    }

    /// The number of bytes requested per read.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The byte lines end at.
    #[inline]
    pub fn terminator(&self) -> u8 {
        self.terminator
    }

    /// Returns the next line from `source`.
    ///
    /// The line includes its terminator, except for a final line the source ended without
    /// terminating. `Ok(None)` means the source is exhausted and nothing is buffered for it;
    /// calling again keeps returning `Ok(None)` for as long as the source stays at end of stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use line_buf_reader::{LineReader, Stream};
    /// use std::io::Cursor;
    ///
    /// let reader = LineReader::builder().chunk_size(4).build().unwrap();
    /// let mut stream = Stream::new(3, Cursor::new(b"abc\ndef\nghi"));
    ///
    /// assert_eq!(reader.next_line(&mut stream).unwrap(), Some(b"abc\n".to_vec()));
    /// assert_eq!(reader.next_line(&mut stream).unwrap(), Some(b"def\n".to_vec()));
    /// assert_eq!(reader.next_line(&mut stream).unwrap(), Some(b"ghi".to_vec()));
    /// assert_eq!(reader.next_line(&mut stream).unwrap(), None);
    /// ```
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidHandle`] if the source's handle is negative. Nothing is read and no
    ///   state changes.
    /// - [`Error::Read`] if reading from the source fails.
    /// - [`Error::Allocation`] if the buffer cannot grow or the line cannot be allocated.
    ///
    /// On a read or allocation failure, every byte buffered for the handle is dropped, so the
    /// next call starts clean.
    pub fn next_line<S: HandleRead + ?Sized>(&self, source: &mut S) -> Result<Option<Vec<u8>>> {
        let handle = source.handle();
        if !handle.is_valid() {
            return Err(Error::InvalidHandle(handle));
        }

        let slot = self.slot(handle);
        let mut carry = slot.lock();

        let result = self.advance(handle, &mut carry, source);
        if matches!(result, Ok(Some(_))) {
            return result;
        }

        match &result {
            Ok(_) => debug!(%handle, "end of stream"),
            Err(error) => warn!(%handle, %error, "dropping buffered bytes after failure"),
        }

        carry.discard();
        drop(carry);
        self.release(handle, &slot);

        result
    }

    /// Returns an iterator over the remaining lines of `source`.
    ///
    /// See [`Lines`].
    pub fn lines<'a, S: HandleRead + ?Sized>(&'a self, source: &'a mut S) -> Lines<'a, S> {
        Lines::new(self, source)
    }

    /// Returns the number of bytes buffered for `handle`.
    ///
    /// Waits for a call on the same handle that is in progress to finish.
    pub fn pending(&self, handle: Handle) -> usize {
        let slot = self.slots.get(&handle).map(|slot| Arc::clone(slot.value()));
        slot.map_or(0, |slot| slot.lock().len())
    }

    /// Returns the number of handles that currently have state.
    pub fn tracked(&self) -> usize {
        self.slots.len()
    }

    /// Drops all state for `handle`, returning `true` if there was any.
    ///
    /// Use this when a source is closed before it was read to the end, so its handle can be
    /// reused for a different source without inheriting buffered bytes.
    pub fn forget(&self, handle: Handle) -> bool {
        let forgotten = self.slots.remove(&handle).is_some();
        if forgotten {
            debug!(%handle, "forgot handle");
        }
        forgotten
    }

    /// Drops the state of every handle.
    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Runs the accumulate and extract phases for one line.
    fn advance<S: HandleRead + ?Sized>(
        &self,
        handle: Handle,
        carry: &mut CarryOver,
        source: &mut S,
    ) -> Result<Option<Vec<u8>>> {
        let mut at = carry.scan(self.terminator);

        while let Terminator::Missing = at {
            carry.reserve(self.chunk_size)?;

            match carry.fill(&mut *source, self.chunk_size) {
                Ok(FillResult::Complete(bytes)) => trace!(%handle, bytes, "read chunk"),
                Ok(FillResult::Eof) => break,
                Err(error) => {
                    return Err(Error::Read {
                        handle,
                        source: error,
                    });
                }
            }

            at = carry.scan(self.terminator);
        }

        if carry.is_empty() {
            return Ok(None);
        }

        carry.take_line(at).map(Some)
    }

    /// Returns the slot for `handle`, creating an empty one if needed.
    fn slot(&self, handle: Handle) -> Slot {
        if let Some(slot) = self.slots.get(&handle) {
            return Arc::clone(slot.value());
        }

        let slot = self.slots.entry(handle).or_default();
        Arc::clone(slot.value())
    }

    /// Removes the slot for `handle` if nobody but the map and the caller holds it.
    ///
    /// The count check runs under the map's write lock, which new lookups need, so a caller
    /// waiting for the same handle always keeps the slot alive.
    fn release(&self, handle: Handle, slot: &Slot) {
        self.slots.remove_if(&handle, |_, held| {
            Arc::ptr_eq(held, slot) && Arc::strong_count(held) == 2
        });
    }
}

/// A builder for constructing a [`LineReader`] with custom settings.
#[must_use]
#[derive(Debug, Clone)]
pub struct LineReaderBuilder {
    chunk_size: usize,
    terminator: u8,
}

impl LineReaderBuilder {
    /// Sets the number of bytes requested per read. Defaults to [`DEFAULT_CHUNK_SIZE`].
    ///
    /// Must be between 1 and [`MAX_READ_COUNT`] exclusive, checked by [`build`](Self::build).
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the byte lines end at. Defaults to [`DEFAULT_TERMINATOR`].
    pub fn terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    /// Builds the [`LineReader`] with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the chunk size is out of range.
    pub fn build(self) -> Result<LineReader> {
        if self.chunk_size == 0 || self.chunk_size >= MAX_READ_COUNT {
            return Err(Error::InvalidConfiguration {
                chunk_size: self.chunk_size,
                max: MAX_READ_COUNT,
            });
        }

        Ok(LineReader {
            slots: DashMap::new(),
            chunk_size: self.chunk_size,
            terminator: self.terminator,
        })
    }
}
