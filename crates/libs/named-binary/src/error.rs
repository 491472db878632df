use std::io;

/// Errors from archive encode and decode operations.
///
/// Every variant is fatal to the operation in progress. A frame whose length
/// prefix has already reached an append-only sink cannot be resumed.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("short write: requested {requested} bytes, wrote {written}")]
    ShortWrite { requested: usize, written: usize },

    #[error("short read: requested {requested} bytes, read {read}")]
    ShortRead { requested: usize, read: usize },

    #[error("scope depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("{open} scope(s) still open at finish")]
    UnbalancedScopes { open: usize },

    #[error("blob of {len} bytes exceeds limit of {limit}")]
    BlobTooLarge { len: u64, limit: u64 },

    #[error("string leaf is not valid utf-8")]
    InvalidUtf8,

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while parsing frame headers or serving frame bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("total size {total} does not match name length {name_len} + body length {body_len} + 8")]
    SizeMismatch { total: u64, name_len: u64, body_len: u64 },

    #[error("name length {len} exceeds limit of {limit}")]
    NameTooLong { len: u64, limit: u64 },

    #[error("body length {len} exceeds limit of {limit}")]
    BodyTooLarge { len: u64, limit: u64 },

    #[error("frame name is not valid utf-8")]
    InvalidName,

    #[error("expected frame '{expected}', found '{found}'")]
    NameMismatch { expected: String, found: String },

    #[error("read of {requested} bytes overruns frame body ({remaining} remaining)")]
    BodyExhausted { requested: usize, remaining: usize },

    #[error("frame '{name}' left {remaining} unread bytes at scope end")]
    TrailingBody { name: String, remaining: usize },
}

impl ArchiveError {
    /// Returns `true` when the error came from a truncated or stalled stream
    /// rather than from malformed content.
    pub fn is_short_transfer(&self) -> bool {
        matches!(self, Self::ShortWrite { .. } | Self::ShortRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_errors_convert_into_archive_errors() {
        let err: ArchiveError = FrameError::InvalidName.into();
        assert!(matches!(err, ArchiveError::Frame(FrameError::InvalidName)));
        assert!(!err.is_short_transfer());
    }

    #[test]
    fn short_transfer_messages_name_both_counts() {
        let err = ArchiveError::ShortRead { requested: 8, read: 3 };
        assert!(err.is_short_transfer());
        assert_eq!(err.to_string(), "short read: requested 8 bytes, read 3");
    }
}
