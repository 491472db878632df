//! Archive traits driven by a traversal engine.
//!
//! The engine opens a scope per field, names leaves, transfers their raw
//! bytes and closes the scope. The provided methods cover the common leaf
//! shapes: fixed-size values, size tags, and length-prefixed blobs.

use std::io::{Read, Write};

use crate::leaf::{Leaf, SizeTag};
use crate::{ArchiveError, Decoder, Encoder, FramedDecoder};

pub trait OutputArchive {
    fn scope_begin(&mut self) -> Result<(), ArchiveError>;
    fn scope_end(&mut self) -> Result<(), ArchiveError>;
    fn set_pending_name(&mut self, name: &str);
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ArchiveError>;

    fn write_field(&mut self, name: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        self.set_pending_name(name);
        self.write_bytes(bytes)
    }

    /// Writes an unnamed leaf in its own scope.
    fn save_value<T: Leaf>(&mut self, value: T) -> Result<(), ArchiveError> {
        self.scope_begin()?;
        self.write_bytes(value.to_native().as_ref())?;
        self.scope_end()
    }

    fn save_named<T: Leaf>(&mut self, name: &str, value: T) -> Result<(), ArchiveError> {
        self.scope_begin()?;
        self.write_field(name, value.to_native().as_ref())?;
        self.scope_end()
    }

    fn save_size_tag(&mut self, len: u64) -> Result<(), ArchiveError> {
        self.save_value(SizeTag(len))
    }

    /// Writes a blob scope: an unnamed size tag child, then the data under
    /// `name`. The child comes first so the blob's frame follows it.
    fn save_binary(&mut self, name: &str, data: &[u8]) -> Result<(), ArchiveError> {
        self.scope_begin()?;
        self.save_size_tag(data.len() as u64)?;
        self.write_field(name, data)?;
        self.scope_end()
    }

    fn save_str(&mut self, name: &str, value: &str) -> Result<(), ArchiveError> {
        self.save_binary(name, value.as_bytes())
    }
}

pub trait InputArchive {
    fn scope_begin(&mut self) -> Result<(), ArchiveError>;
    fn scope_end(&mut self) -> Result<(), ArchiveError>;
    fn set_pending_name(&mut self, name: &str);
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), ArchiveError>;

    /// Largest blob [`load_binary`](Self::load_binary) will allocate.
    fn max_blob_len(&self) -> u64;

    fn read_field(&mut self, name: &str, buf: &mut [u8]) -> Result<(), ArchiveError> {
        self.set_pending_name(name);
        self.read_bytes(buf)
    }

    fn load_value<T: Leaf>(&mut self) -> Result<T, ArchiveError> {
        let mut bytes = T::Bytes::default();
        self.scope_begin()?;
        self.read_bytes(bytes.as_mut())?;
        self.scope_end()?;
        Ok(T::from_native(bytes))
    }

    fn load_named<T: Leaf>(&mut self, name: &str) -> Result<T, ArchiveError> {
        let mut bytes = T::Bytes::default();
        self.scope_begin()?;
        self.read_field(name, bytes.as_mut())?;
        self.scope_end()?;
        Ok(T::from_native(bytes))
    }

    fn load_size_tag(&mut self) -> Result<u64, ArchiveError> {
        self.load_value::<SizeTag>().map(|tag| tag.0)
    }

    fn load_binary(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        self.scope_begin()?;
        let len = self.load_size_tag()?;
        let limit = self.max_blob_len();
        if len > limit {
            return Err(ArchiveError::BlobTooLarge { len, limit });
        }
        let mut data = vec![0u8; len as usize];
        self.read_field(name, &mut data)?;
        self.scope_end()?;
        Ok(data)
    }

    fn load_string(&mut self, name: &str) -> Result<String, ArchiveError> {
        String::from_utf8(self.load_binary(name)?).map_err(|_| ArchiveError::InvalidUtf8)
    }
}

impl<W: Write> OutputArchive for Encoder<W> {
    fn scope_begin(&mut self) -> Result<(), ArchiveError> {
        Encoder::scope_begin(self)
    }

    fn scope_end(&mut self) -> Result<(), ArchiveError> {
        Encoder::scope_end(self)
    }

    fn set_pending_name(&mut self, name: &str) {
        Encoder::set_pending_name(self, name);
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ArchiveError> {
        Encoder::write_bytes(self, bytes)
    }
}

impl<R: Read> InputArchive for Decoder<R> {
    fn scope_begin(&mut self) -> Result<(), ArchiveError> {
        Decoder::scope_begin(self)
    }

    fn scope_end(&mut self) -> Result<(), ArchiveError> {
        Decoder::scope_end(self)
    }

    fn set_pending_name(&mut self, name: &str) {
        Decoder::set_pending_name(self, name);
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), ArchiveError> {
        Decoder::read_bytes(self, buf)
    }

    fn max_blob_len(&self) -> u64 {
        self.options().max_blob_len
    }
}

impl<R: Read> InputArchive for FramedDecoder<R> {
    fn scope_begin(&mut self) -> Result<(), ArchiveError> {
        FramedDecoder::scope_begin(self)
    }

    fn scope_end(&mut self) -> Result<(), ArchiveError> {
        FramedDecoder::scope_end(self)
    }

    fn set_pending_name(&mut self, name: &str) {
        FramedDecoder::set_pending_name(self, name);
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), ArchiveError> {
        FramedDecoder::read_bytes(self, buf)
    }

    fn max_blob_len(&self) -> u64 {
        self.options().max_blob_len
    }
}
