//! Frame-aware reading.
//!
//! [`FrameReader`] walks a stream frame by frame. [`FramedDecoder`] layers
//! the archive read contract on top: the first read inside a scope pulls the
//! next frame and later reads in the same scope consume its body.
//!
//! Frames are emitted in scope-end order, so a scope's direct writes must
//! follow all of its child scopes for reads to pair with the right frame.

use std::io::Read;

use crate::frame::{Frame, LENGTH_FIELD_SIZE};
use crate::{ArchiveError, DecoderOptions, FrameError};

pub struct FrameReader<R: Read> {
    source: R,
    options: DecoderOptions,
    frames_read: usize,
    bytes_read: usize,
    failed: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, DecoderOptions::default())
    }

    pub fn with_options(source: R, options: DecoderOptions) -> Self {
        Self { source, options, frames_read: 0, bytes_read: 0, failed: false }
    }

    /// Reads the next frame, or `None` at a clean end of stream.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, ArchiveError> {
        match Frame::read_from(&mut self.source, &self.options) {
            Ok(Some(frame)) => {
                self.frames_read += 1;
                self.bytes_read += frame.encoded_len();
                log::trace!("nb: read frame '{}' body={}", frame.name, frame.body.len());
                Ok(Some(frame))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                self.failed = true;
                Err(err)
            }
        }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

/// Yields frames until the end of the stream; stops after the first error.
impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame, ArchiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.next_frame().transpose()
    }
}

#[derive(Debug, Default)]
struct ReadScope {
    frame: Option<Frame>,
    pos: usize,
    expected: String,
}

impl ReadScope {
    fn remaining(&self) -> usize {
        self.frame.as_ref().map_or(0, |frame| frame.body.len() - self.pos)
    }
}

/// Decoder for streams written by [`Encoder`](crate::Encoder).
pub struct FramedDecoder<R: Read> {
    reader: FrameReader<R>,
    scopes: Vec<ReadScope>,
    pending_name: String,
}

impl<R: Read> FramedDecoder<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, DecoderOptions::default())
    }

    pub fn with_options(source: R, options: DecoderOptions) -> Self {
        Self {
            reader: FrameReader::with_options(source, options),
            scopes: Vec::new(),
            pending_name: String::new(),
        }
    }

    pub fn scope_begin(&mut self) -> Result<(), ArchiveError> {
        if let Some(limit) = self.reader.options().max_depth {
            if self.scopes.len() >= limit {
                return Err(ArchiveError::DepthExceeded { limit });
            }
        }
        self.scopes.push(ReadScope::default());
        Ok(())
    }

    /// Records the name expected for the innermost scope's frame. The last
    /// non-empty name announced in a scope is the one checked.
    pub fn set_pending_name(&mut self, name: &str) {
        name.clone_into(&mut self.pending_name);
    }

    /// Serves `buf.len()` bytes from the innermost scope's frame, pulling the
    /// frame first if the scope has none yet. Empty reads never pull.
    ///
    /// A pending name is consumed and replaces the scope's expected name;
    /// it is checked against the frame when the scope ends.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), ArchiveError> {
        let expected = std::mem::take(&mut self.pending_name);
        let Some(scope) = self.scopes.last_mut() else {
            panic!("read_bytes called with no open scope");
        };
        if !expected.is_empty() {
            scope.expected = expected;
        }
        if buf.is_empty() {
            return Ok(());
        }

        if scope.frame.is_none() {
            let Some(frame) = self.reader.next_frame()? else {
                return Err(ArchiveError::ShortRead { requested: LENGTH_FIELD_SIZE, read: 0 });
            };
            scope.frame = Some(frame);
            scope.pos = 0;
        }

        let remaining = scope.remaining();
        if buf.len() > remaining {
            return Err(FrameError::BodyExhausted { requested: buf.len(), remaining }.into());
        }
        if let Some(frame) = &scope.frame {
            buf.copy_from_slice(&frame.body[scope.pos..scope.pos + buf.len()]);
        }
        scope.pos += buf.len();
        Ok(())
    }

    /// Closes the innermost scope. Its frame must carry the last expected
    /// name (when validation is on) and its body must be fully consumed.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open.
    pub fn scope_end(&mut self) -> Result<(), ArchiveError> {
        let Some(scope) = self.scopes.pop() else {
            panic!("scope_end called with no open scope");
        };
        let remaining = scope.remaining();
        let Some(frame) = scope.frame else {
            return Ok(());
        };
        let validate = self.reader.options().validate_names;
        if validate && !scope.expected.is_empty() && frame.name != scope.expected {
            let expected = scope.expected;
            return Err(FrameError::NameMismatch { expected, found: frame.name }.into());
        }
        if remaining > 0 {
            return Err(FrameError::TrailingBody { name: frame.name, remaining }.into());
        }
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn options(&self) -> &DecoderOptions {
        self.reader.options()
    }

    pub fn frames_read(&self) -> usize {
        self.reader.frames_read()
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(frames: &[Frame]) -> Vec<u8> {
        frames.iter().flat_map(Frame::to_bytes).collect()
    }

    #[test]
    fn frame_reader_iterates_until_end() {
        let bytes = stream(&[Frame::new("a", [1u8]), Frame::new("b", [2u8, 3])]);
        let frames: Vec<Frame> = FrameReader::new(bytes.as_slice())
            .collect::<Result<_, _>>()
            .expect("frames");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].name, "b");
        assert_eq!(frames[1].body, vec![2, 3]);
    }

    #[test]
    fn frame_reader_stops_after_error() {
        let mut bytes = stream(&[Frame::new("a", [1u8])]);
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut reader = FrameReader::new(bytes.as_slice());
        assert!(reader.next().expect("first").is_ok());
        assert!(reader.next().expect("second").is_err());
        assert!(reader.next().is_none());
        assert_eq!(reader.frames_read(), 1);
    }

    #[test]
    fn reads_within_one_scope_share_its_frame() {
        let bytes = stream(&[Frame::new("pair", [1u8, 2, 3, 4])]);
        let mut dec = FramedDecoder::new(bytes.as_slice());
        dec.scope_begin().expect("begin");
        let mut head = [0u8; 1];
        let mut tail = [0u8; 3];
        dec.set_pending_name("pair");
        dec.read_bytes(&mut head).expect("head");
        dec.read_bytes(&mut tail).expect("tail");
        dec.scope_end().expect("end");
        assert_eq!(head, [1]);
        assert_eq!(tail, [2, 3, 4]);
        assert_eq!(dec.frames_read(), 1);
    }

    #[test]
    fn name_mismatch_is_reported() {
        let bytes = stream(&[Frame::new("actual", [0u8])]);
        let mut dec = FramedDecoder::new(bytes.as_slice());
        dec.scope_begin().expect("begin");
        dec.set_pending_name("wanted");
        dec.read_bytes(&mut [0u8; 1]).expect("read");
        let err = dec.scope_end().expect_err("mismatch");
        assert!(matches!(
            err,
            ArchiveError::Frame(FrameError::NameMismatch { ref expected, ref found })
                if expected == "wanted" && found == "actual"
        ));
    }

    #[test]
    fn last_announced_name_is_checked() {
        let bytes = stream(&[Frame::new("second", [1u8, 2])]);
        let mut dec = FramedDecoder::new(bytes.as_slice());
        dec.scope_begin().expect("begin");
        let mut buf = [0u8; 1];
        dec.set_pending_name("first");
        dec.read_bytes(&mut buf).expect("first");
        dec.read_bytes(&mut buf).expect("unnamed");
        dec.set_pending_name("second");
        dec.read_bytes(&mut [0u8; 0]).expect("empty");
        dec.scope_end().expect("end");
    }

    #[test]
    fn name_validation_can_be_disabled() {
        let bytes = stream(&[Frame::new("actual", [5u8])]);
        let opts = DecoderOptions { validate_names: false, ..DecoderOptions::default() };
        let mut dec = FramedDecoder::with_options(bytes.as_slice(), opts);
        dec.scope_begin().expect("begin");
        dec.set_pending_name("wanted");
        let mut buf = [0u8; 1];
        dec.read_bytes(&mut buf).expect("read");
        assert_eq!(buf, [5]);
    }

    #[test]
    fn overrunning_the_body_is_an_error() {
        let bytes = stream(&[Frame::new("n", [0u8; 2])]);
        let mut dec = FramedDecoder::new(bytes.as_slice());
        dec.scope_begin().expect("begin");
        let err = dec.read_bytes(&mut [0u8; 4]).expect_err("overrun");
        assert!(matches!(
            err,
            ArchiveError::Frame(FrameError::BodyExhausted { requested: 4, remaining: 2 })
        ));
    }

    #[test]
    fn unread_body_fails_scope_end() {
        let bytes = stream(&[Frame::new("n", [0u8; 4])]);
        let mut dec = FramedDecoder::new(bytes.as_slice());
        dec.scope_begin().expect("begin");
        dec.read_bytes(&mut [0u8; 1]).expect("partial");
        let err = dec.scope_end().expect_err("trailing");
        assert!(matches!(
            err,
            ArchiveError::Frame(FrameError::TrailingBody { ref name, remaining: 3 }) if name == "n"
        ));
    }

    #[test]
    fn empty_reads_do_not_pull_frames() {
        let mut dec = FramedDecoder::new(&b""[..]);
        dec.scope_begin().expect("begin");
        dec.read_bytes(&mut []).expect("empty read");
        dec.scope_end().expect("end");
        assert_eq!(dec.frames_read(), 0);
    }

    #[test]
    fn missing_frame_is_short_read() {
        let mut dec = FramedDecoder::new(&b""[..]);
        dec.scope_begin().expect("begin");
        let err = dec.read_bytes(&mut [0u8; 1]).expect_err("no frame");
        assert!(matches!(err, ArchiveError::ShortRead { requested: 8, read: 0 }));
    }
}
