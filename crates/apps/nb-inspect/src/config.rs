use named_binary::DecoderOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_PREVIEW_BYTES: usize = 16;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Body bytes shown per frame in listings.
    pub preview_bytes: usize,
    pub decoder: DecoderOptions,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self { preview_bytes: DEFAULT_PREVIEW_BYTES, decoder: DecoderOptions::default() }
    }
}

impl InspectConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }
}
