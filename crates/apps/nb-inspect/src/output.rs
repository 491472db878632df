use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::inspect::{FrameSummary, VerifyReport};

#[derive(Debug, Clone)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    pub fn emit_frames(&self, frames: &[FrameSummary]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.json {
            return self.emit_json(frames);
        }
        println!("{}", frame_table(frames));
        Ok(())
    }

    pub fn emit_report(&self, report: &VerifyReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.json {
            return self.emit_json(report);
        }
        println!(
            "ok: {} frames, {} bytes ({} named, largest body {} bytes)",
            report.frames, report.bytes, report.named_frames, report.largest_body
        );
        Ok(())
    }

    fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub fn frame_table(frames: &[FrameSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "offset", "name", "body", "total", "preview"]);
    for frame in frames {
        let name = if frame.name.is_empty() { "<unnamed>" } else { frame.name.as_str() };
        let preview = if frame.truncated {
            format!("{}...", frame.preview)
        } else {
            frame.preview.clone()
        };
        table.add_row(vec![
            Cell::new(frame.index),
            Cell::new(frame.offset),
            Cell::new(name),
            Cell::new(frame.body_len),
            Cell::new(frame.total_size),
            Cell::new(preview),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_frames_are_labelled() {
        let frames = vec![
            FrameSummary {
                index: 0,
                offset: 0,
                name: "count".into(),
                body_len: 4,
                total_size: 17,
                preview: "03000000".into(),
                truncated: false,
            },
            FrameSummary {
                index: 1,
                offset: 33,
                name: String::new(),
                body_len: 8,
                total_size: 16,
                preview: "0300".into(),
                truncated: true,
            },
        ];
        let table = frame_table(&frames);
        assert_eq!(table.row_iter().count(), 2);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[1].contains("offset") && lines[1].contains("preview"));
        let unnamed = lines.iter().find(|line| line.contains("<unnamed>")).expect("unnamed row");
        assert!(unnamed.contains("0300..."));
        assert!(unnamed.contains("33"));
        assert!(rendered.contains("count"));
        assert!(!rendered.contains("03000000..."));
    }
}
