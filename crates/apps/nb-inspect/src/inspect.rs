use named_binary::{ArchiveError, DecoderOptions, FrameReader};
use serde::Serialize;
use std::io::Read;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FrameSummary {
    pub index: usize,
    pub offset: usize,
    pub name: String,
    pub body_len: usize,
    pub total_size: u64,
    /// Hex of the first body bytes.
    pub preview: String,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VerifyReport {
    pub frames: usize,
    pub bytes: usize,
    pub named_frames: usize,
    pub largest_body: usize,
}

pub fn summarize_frames<R: Read>(
    source: R,
    options: DecoderOptions,
    preview_bytes: usize,
) -> Result<Vec<FrameSummary>, ArchiveError> {
    let mut reader = FrameReader::with_options(source, options);
    let mut summaries = Vec::new();
    let mut offset = 0;
    while let Some(frame) = reader.next_frame()? {
        let shown = frame.body.len().min(preview_bytes);
        summaries.push(FrameSummary {
            index: summaries.len(),
            offset,
            name: frame.name.clone(),
            body_len: frame.body.len(),
            total_size: frame.total_size(),
            preview: hex::encode(&frame.body[..shown]),
            truncated: shown < frame.body.len(),
        });
        offset += frame.encoded_len();
    }
    Ok(summaries)
}

/// Walks every frame, stopping at the first invalid one.
pub fn verify_stream<R: Read>(
    source: R,
    options: DecoderOptions,
) -> Result<VerifyReport, ArchiveError> {
    let mut reader = FrameReader::with_options(source, options);
    let mut named_frames = 0;
    let mut largest_body = 0;
    while let Some(frame) = reader.next_frame()? {
        if !frame.name.is_empty() {
            named_frames += 1;
        }
        largest_body = largest_body.max(frame.body.len());
    }
    log::debug!("verified {} frames ({} bytes)", reader.frames_read(), reader.bytes_read());
    Ok(VerifyReport {
        frames: reader.frames_read(),
        bytes: reader.bytes_read(),
        named_frames,
        largest_body,
    })
}
