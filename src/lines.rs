use crate::error::Result;
use crate::read::HandleRead;
use crate::reader::LineReader;
use std::iter::FusedIterator;

/// An iterator over the lines of a source.
///
/// Created by [`LineReader::lines`]. Each item is what
/// [`next_line`](LineReader::next_line) returns, until it reports end of stream. An error is
/// yielded once and ends the iteration; the reader has already reset the handle by then, so
/// calling [`LineReader::lines`] again picks up from a clean state.
///
/// # Examples
///
/// ```
/// use line_buf_reader::{LineReader, Stream};
/// use std::io::Cursor;
///
/// let reader = LineReader::new();
/// let mut stream = Stream::new(0, Cursor::new(b"one\ntwo\nthree"));
///
/// let lines: Vec<Vec<u8>> = reader.lines(&mut stream).collect::<Result<_, _>>().unwrap();
/// assert_eq!(lines, [b"one\n".as_slice(), b"two\n", b"three"]);
/// ```
#[derive(Debug)]
pub struct Lines<'a, S: ?Sized> {
    reader: &'a LineReader,
    source: &'a mut S,
    done: bool,
}

impl<'a, S: HandleRead + ?Sized> Lines<'a, S> {
    pub(crate) fn new(reader: &'a LineReader, source: &'a mut S) -> Self {
        Self {
            reader,
            source,
            done: false,
        }
    }
}

impl<S: HandleRead + ?Sized> Iterator for Lines<'_, S> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.next_line(&mut *self.source) {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: HandleRead + ?Sized> FusedIterator for Lines<'_, S> {}
