//! Inspection helpers for named binary archive streams.

pub mod config;
pub mod inspect;
pub mod output;

pub use config::InspectConfig;
pub use inspect::{summarize_frames, verify_stream, FrameSummary, VerifyReport};
pub use output::Output;
