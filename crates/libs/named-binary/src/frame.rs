//! Frame wire layout.
//!
//! ```text
//! [total:8][name_len:8][name:name_len][body_len:8][body:body_len]
//! total = body_len + name_len + 8
//! ```
//!
//! All length fields are little-endian `u64`, each byte carrying its full
//! eight bits.

use std::io::{Read, Write};

use crate::io::{fill, read_exact_counted, write_all_counted};
use crate::{ArchiveError, DecoderOptions, FrameError};

/// Size in bytes of each length field.
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Fixed header overhead of one frame: three length fields.
pub const FRAME_OVERHEAD: usize = 3 * LENGTH_FIELD_SIZE;

/// Encodes a length field least-significant byte first.
pub fn encode_length(value: u64) -> [u8; LENGTH_FIELD_SIZE] {
    value.to_le_bytes()
}

pub fn decode_length(bytes: [u8; LENGTH_FIELD_SIZE]) -> u64 {
    u64::from_le_bytes(bytes)
}

/// The `total` header field: body, name and the body-length field itself.
pub fn total_size(name_len: u64, body_len: u64) -> Option<u64> {
    body_len.checked_add(name_len)?.checked_add(LENGTH_FIELD_SIZE as u64)
}

/// Everything that precedes the body: `total`, `name_len`, name, `body_len`.
fn encode_header(name: &str, body_len: usize, extra_capacity: usize) -> Vec<u8> {
    let name_len = name.len() as u64;
    let body_len = body_len as u64;
    let total = body_len + name_len + LENGTH_FIELD_SIZE as u64;

    let mut header = Vec::with_capacity(FRAME_OVERHEAD + name.len() + extra_capacity);
    header.extend_from_slice(&encode_length(total));
    header.extend_from_slice(&encode_length(name_len));
    header.extend_from_slice(name.as_bytes());
    header.extend_from_slice(&encode_length(body_len));
    header
}

/// Writes one frame and returns the number of bytes it occupies on the wire.
pub(crate) fn write_frame<W: Write + ?Sized>(
    sink: &mut W,
    name: &str,
    body: &[u8],
) -> Result<usize, ArchiveError> {
    let header = encode_header(name, body.len(), 0);
    write_all_counted(sink, &header)?;
    write_all_counted(sink, body)?;
    Ok(header.len() + body.len())
}

/// One decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub body: Vec<u8>,
}

impl Frame {
    pub fn new(name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), body: body.into() }
    }

    /// Value of the `total` header field.
    pub fn total_size(&self) -> u64 {
        (self.body.len() + self.name.len() + LENGTH_FIELD_SIZE) as u64
    }

    /// Bytes the frame occupies on the wire, headers included.
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.name.len() + self.body.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = encode_header(&self.name, self.body.len(), self.body.len());
        out.extend_from_slice(&self.body);
        out
    }

    /// Reads the next frame from `source`.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly on a frame boundary;
    /// a stream that ends inside a frame is a `ShortRead`.
    pub fn read_from<R: Read + ?Sized>(
        source: &mut R,
        limits: &DecoderOptions,
    ) -> Result<Option<Self>, ArchiveError> {
        let mut field = [0u8; LENGTH_FIELD_SIZE];
        let read = fill(source, &mut field)?;
        if read == 0 {
            return Ok(None);
        }
        if read != LENGTH_FIELD_SIZE {
            return Err(ArchiveError::ShortRead { requested: LENGTH_FIELD_SIZE, read });
        }
        let total = decode_length(field);

        read_exact_counted(source, &mut field)?;
        let name_len = decode_length(field);
        if name_len > limits.max_name_len {
            let limit = limits.max_name_len;
            return Err(FrameError::NameTooLong { len: name_len, limit }.into());
        }

        let mut name = vec![0u8; name_len as usize];
        read_exact_counted(source, &mut name)?;
        let name = String::from_utf8(name).map_err(|_| FrameError::InvalidName)?;

        read_exact_counted(source, &mut field)?;
        let body_len = decode_length(field);
        if total_size(name_len, body_len) != Some(total) {
            return Err(FrameError::SizeMismatch { total, name_len, body_len }.into());
        }
        if body_len > limits.max_frame_len {
            let limit = limits.max_frame_len;
            return Err(FrameError::BodyTooLarge { len: body_len, limit }.into());
        }

        let mut body = vec![0u8; body_len as usize];
        read_exact_counted(source, &mut body)?;
        Ok(Some(Self { name, body }))
    }
}
