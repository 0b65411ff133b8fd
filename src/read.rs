use crate::handle::Handle;
use std::io::{self, IoSliceMut, Read};

/// A [`Read`] that knows which [`Handle`] it is read through.
///
/// The handle is what a [`LineReader`](crate::LineReader) keys carry-over state on, so the same
/// source must report the same handle on every call, and distinct live sources must report
/// distinct handles.
///
/// Use [`Stream`] to attach a handle to any reader. On Unix, files, TCP streams and stdin
/// implement this trait directly with their raw file descriptor as the handle.
pub trait HandleRead: Read {
    /// Returns the handle of this source.
    fn handle(&self) -> Handle;
}

impl<S: HandleRead + ?Sized> HandleRead for &mut S {
    fn handle(&self) -> Handle {
        (**self).handle()
    }
}

impl<S: HandleRead + ?Sized> HandleRead for Box<S> {
    fn handle(&self) -> Handle {
        (**self).handle()
    }
}

/// Pairs an explicit [`Handle`] with a reader.
///
/// # Examples
///
/// ```
/// use line_buf_reader::{Handle, HandleRead, Stream};
/// use std::io::Cursor;
///
/// let stream = Stream::new(Handle::new(7), Cursor::new(b"data\n"));
/// assert_eq!(stream.handle(), Handle::new(7));
/// ```
#[derive(Debug)]
pub struct Stream<R> {
    handle: Handle,
    inner: R,
}

impl<R: Read> Stream<R> {
    /// Creates a stream reading from `inner` under `handle`.
    pub fn new(handle: impl Into<Handle>, inner: R) -> Self {
        Self {
            handle: handle.into(),
            inner,
        }
    }
}

impl<R> Stream<R> {
    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the underlying reader.
    ///
    /// Reading from it directly bypasses any line state held for this handle.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps this stream, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Stream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        self.inner.read_vectored(bufs)
    }
}

impl<R: Read> HandleRead for Stream<R> {
    fn handle(&self) -> Handle {
        self.handle
    }
}

#[cfg(unix)]
mod unix {
    use super::HandleRead;
    use crate::handle::Handle;
    use std::fs::File;
    use std::io::Stdin;
    use std::net::TcpStream;
    use std::os::fd::AsRawFd;

    macro_rules! fd_handle_read {
        ($($ty:ty),* $(,)?) => {
            $(
                impl HandleRead for $ty {
                    fn handle(&self) -> Handle {
                        Handle::from(self.as_raw_fd())
                    }
                }
            )*
        };
    }

    fd_handle_read!(File, TcpStream, Stdin);
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::indexing_slicing,
        clippy::unwrap_used,
        reason = "Okay in tests"
    )]

    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stream_handle() {
        let stream = Stream::new(5, Cursor::new("abc"));
        assert_eq!(stream.handle(), Handle::new(5));
    }

    #[test]
    fn test_stream_read_passthrough() {
        let mut stream = Stream::new(5, Cursor::new("abc"));
        let mut buf = [0u8; 8];

        let len = stream.read(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"abc");
        assert_eq!(stream.get_ref().position(), 3);

        let cursor = stream.into_inner();
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_handle_through_references() {
        let mut stream = Stream::new(9, Cursor::new(""));
        let by_ref = &mut stream;
        assert_eq!(by_ref.handle(), Handle::new(9));

        let boxed: Box<dyn HandleRead> = Box::new(Stream::new(10, Cursor::new("")));
        assert_eq!(boxed.handle(), Handle::new(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_handle_is_raw_fd() {
        use std::os::fd::AsRawFd;

        let file = std::fs::File::open("Cargo.toml").unwrap();
        assert_eq!(file.handle(), Handle::from(file.as_raw_fd()));
        assert!(file.handle().is_valid());
    }
}
