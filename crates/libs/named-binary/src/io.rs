//! Byte sink and source plumbing.
//!
//! The archive talks to plain `std::io::Write` / `std::io::Read` streams.
//! These helpers loop over partial transfers and report the exact number of
//! bytes moved when a stream gives up early.

use std::io::{ErrorKind, Read, Write};

use crate::ArchiveError;

/// Writes all of `bytes`, failing with `ShortWrite` if the sink stops
/// accepting data before the end.
pub(crate) fn write_all_counted<W: Write + ?Sized>(
    sink: &mut W,
    bytes: &[u8],
) -> Result<(), ArchiveError> {
    let mut written = 0;
    while written < bytes.len() {
        match sink.write(&bytes[written..]) {
            Ok(0) => return Err(ArchiveError::ShortWrite { requested: bytes.len(), written }),
            Ok(n) => written += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) if err.kind() == ErrorKind::WriteZero => {
                return Err(ArchiveError::ShortWrite { requested: bytes.len(), written });
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Reads until `buf` is full or the source is exhausted and returns the
/// number of bytes read.
pub(crate) fn fill<R: Read + ?Sized>(
    source: &mut R,
    buf: &mut [u8],
) -> Result<usize, ArchiveError> {
    let mut read = 0;
    while read < buf.len() {
        match source.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(read)
}

/// Fills `buf` completely, failing with `ShortRead` otherwise.
pub(crate) fn read_exact_counted<R: Read + ?Sized>(
    source: &mut R,
    buf: &mut [u8],
) -> Result<(), ArchiveError> {
    let read = fill(source, buf)?;
    if read != buf.len() {
        return Err(ArchiveError::ShortRead { requested: buf.len(), read });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Accepts at most `capacity` bytes, one byte per call.
    struct Trickle {
        accepted: Vec<u8>,
        capacity: usize,
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accepted.len() >= self.capacity || buf.is_empty() {
                return Ok(0);
            }
            self.accepted.push(buf[0]);
            Ok(1)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn partial_writes_are_retried_until_complete() {
        let mut sink = Trickle { accepted: Vec::new(), capacity: 16 };
        write_all_counted(&mut sink, b"abcdef").expect("write");
        assert_eq!(sink.accepted, b"abcdef");
    }

    #[test]
    fn stalled_sink_reports_bytes_written() {
        let mut sink = Trickle { accepted: Vec::new(), capacity: 3 };
        let err = write_all_counted(&mut sink, b"abcdef").expect_err("sink should stall");
        assert!(matches!(err, ArchiveError::ShortWrite { requested: 6, written: 3 }));
    }

    #[test]
    fn truncated_source_reports_bytes_read() {
        let mut source: &[u8] = &[1, 2, 3];
        let mut buf = [0u8; 5];
        let err = read_exact_counted(&mut source, &mut buf).expect_err("source is short");
        assert!(matches!(err, ArchiveError::ShortRead { requested: 5, read: 3 }));
    }

    #[test]
    fn fill_stops_at_end_of_stream() {
        let mut source: &[u8] = &[9, 8];
        let mut buf = [0u8; 4];
        assert_eq!(fill(&mut source, &mut buf).expect("fill"), 2);
        assert_eq!(&buf[..2], &[9, 8]);
    }
}
