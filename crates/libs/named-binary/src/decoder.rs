use std::io::Read;

use crate::io::read_exact_counted;
use crate::{ArchiveError, DecoderOptions};

/// Sequential pass-through decoder.
///
/// Reads leaf bytes straight off the source in the order they are asked
/// for. Scope and naming calls carry no state, and frame headers are not
/// parsed: a stream produced by [`Encoder`](crate::Encoder) must be read
/// with [`FramedDecoder`](crate::FramedDecoder) instead.
pub struct Decoder<R: Read> {
    source: R,
    options: DecoderOptions,
    bytes_read: usize,
}

impl<R: Read> Decoder<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, DecoderOptions::default())
    }

    pub fn with_options(source: R, options: DecoderOptions) -> Self {
        Self { source, options, bytes_read: 0 }
    }

    pub fn scope_begin(&mut self) -> Result<(), ArchiveError> {
        Ok(())
    }

    pub fn scope_end(&mut self) -> Result<(), ArchiveError> {
        Ok(())
    }

    pub fn set_pending_name(&mut self, _name: &str) {}

    /// Fills `buf` from the source, failing with `ShortRead` if the source
    /// runs dry first.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), ArchiveError> {
        read_exact_counted(&mut self.source, buf)?;
        self.bytes_read += buf.len();
        Ok(())
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}
