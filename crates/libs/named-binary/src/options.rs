use serde::Deserialize;

/// Default cap on a single frame body or blob: 64 MiB.
pub const DEFAULT_MAX_BODY_LEN: u64 = 64 * 1024 * 1024;

/// Default cap on a frame name.
pub const DEFAULT_MAX_NAME_LEN: u64 = 4096;

/// Encoder tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Maximum number of simultaneously open scopes. `None` leaves nesting
    /// bounded only by memory.
    pub max_depth: Option<usize>,
}

/// Decoder limits.
///
/// The limits guard allocations driven by length values read off the wire,
/// so a corrupt or hostile stream cannot request an arbitrarily large buffer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    pub max_depth: Option<usize>,
    pub max_frame_len: u64,
    pub max_name_len: u64,
    pub max_blob_len: u64,
    /// Reject frames whose name differs from the name announced before the
    /// read. Unnamed reads always accept.
    pub validate_names: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_frame_len: DEFAULT_MAX_BODY_LEN,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_blob_len: DEFAULT_MAX_BODY_LEN,
            validate_names: true,
        }
    }
}
