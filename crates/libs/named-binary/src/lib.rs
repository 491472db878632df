//! # named-binary
//!
//! Named binary archive: serializes a tree of named fields into a flat
//! sequence of self-describing frames.
//!
//! A traversal engine walks the value depth-first and drives an
//! [`OutputArchive`]: one scope per field, a name for each leaf, and the
//! leaf's raw bytes. The [`Encoder`] buffers each open scope in its own
//! node and, when the scope closes, writes one frame for it. Scopes that
//! never receive bytes directly (pure containers) produce no output.
//!
//! ## Frame layout
//!
//! ```text
//! [total:8][name_len:8][name][body_len:8][body]
//!  total = body_len + name_len + 8, little-endian u64 length fields
//! ```
//!
//! Leaf bodies are raw machine-native bytes; the format is not portable
//! across endianness.
//!
//! ## Reading
//!
//! - [`FramedDecoder`] parses frames and pairs each scope's reads with the
//!   next frame in the stream.
//! - [`Decoder`] is a sequential pass-through reader for streams of raw
//!   leaf bytes without frame headers.
//!
//! ## Example
//!
//! ```rust
//! use named_binary::{Encoder, FramedDecoder, InputArchive, OutputArchive};
//!
//! let mut enc = Encoder::new(Vec::new());
//! enc.scope_begin().unwrap();
//! enc.save_named("x", 42i32).unwrap();
//! enc.save_str("label", "ready").unwrap();
//! enc.scope_end().unwrap();
//! let bytes = enc.finish().unwrap();
//!
//! let mut dec = FramedDecoder::new(bytes.as_slice());
//! dec.scope_begin().unwrap();
//! assert_eq!(dec.load_named::<i32>("x").unwrap(), 42);
//! assert_eq!(dec.load_string("label").unwrap(), "ready");
//! dec.scope_end().unwrap();
//! ```

pub mod archive;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod framed;
pub mod leaf;
pub mod options;

mod io;
mod node;

pub use archive::{InputArchive, OutputArchive};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{ArchiveError, FrameError};
pub use frame::Frame;
pub use framed::{FrameReader, FramedDecoder};
pub use leaf::{Leaf, SizeTag};
pub use options::{DecoderOptions, EncoderOptions};
