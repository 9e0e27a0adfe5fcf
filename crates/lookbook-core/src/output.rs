//! JSON and JSON Lines output for search results.
//!
//! Results are written as [`RankedResult`] records: the candidate plus its
//! 1-based rank and the query that produced it, so JSONL streams from several
//! queries stay self-describing.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::types::{Candidate, ScoreBreakdown, StructuredAttributes};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single JSON object or array
    #[default]
    Json,
    /// One JSON object per line (newline-delimited JSON)
    #[serde(rename = "jsonl")]
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// One ranked search result as written to output.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult<'a> {
    pub query: &'a str,
    pub rank: usize,
    pub id: &'a str,
    pub image_name: &'a str,
    pub score: f32,
    pub base_score: f32,
    pub caption: &'a str,
    pub attributes: &'a StructuredAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<&'a ScoreBreakdown>,
}

impl<'a> RankedResult<'a> {
    /// Rank `results` in order. Breakdowns are included only when `explain`
    /// is set.
    pub fn from_candidates(query: &'a str, results: &'a [Candidate], explain: bool) -> Vec<Self> {
        results
            .iter()
            .enumerate()
            .map(|(i, c)| Self {
                query,
                rank: i + 1,
                id: &c.id,
                image_name: &c.image_identity,
                score: c.final_score,
                base_score: c.base_score,
                caption: &c.caption,
                attributes: &c.attributes,
                breakdown: if explain { c.breakdown.as_ref() } else { None },
            })
            .collect()
    }
}

/// A writer that serializes items to JSON or JSONL format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects the JSON format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write a single item.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Json if self.pretty => {
                serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
            }
            // JSONL is never pretty-printed (one object per line)
            _ => {
                serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
            }
        }
        writeln!(self.writer)?;
        self.items_written += 1;
        Ok(())
    }

    /// Write multiple items: a JSON array, or one line per item for JSONL.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, items)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
                self.items_written += items.len();
            }
            OutputFormat::JsonLines => {
                for item in items {
                    self.write(item)?;
                }
            }
        }
        Ok(())
    }

    /// Get the number of items written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImagePayload, SearchHit};

    fn candidates() -> Vec<Candidate> {
        ["look_01.jpg", "look_02.jpg"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut c = Candidate::from_hit(SearchHit {
                    id: i.to_string(),
                    score: 0.8 - i as f32 * 0.1,
                    payload: ImagePayload {
                        image_name: Some(name.to_string()),
                        caption: Some("a red tie and a white shirt".to_string()),
                        ..Default::default()
                    },
                });
                c.final_score = c.base_score;
                c.breakdown = Some(ScoreBreakdown {
                    composition: Some(1.0),
                    ..Default::default()
                });
                c
            })
            .collect()
    }

    #[test]
    fn test_write_json_array() {
        let results = candidates();
        let records = RankedResult::from_candidates("red tie", &results, false);

        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, false);
        writer.write_all(&records).unwrap();
        assert_eq!(writer.items_written(), 2);

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with('['));
        assert!(output.trim().ends_with(']'));
        assert!(output.contains("\"image_name\":\"look_01.jpg\""));
        assert!(!output.contains("breakdown"));
    }

    #[test]
    fn test_write_jsonl_one_line_per_result() {
        let results = candidates();
        let records = RankedResult::from_candidates("red tie", &results, true);

        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::JsonLines, true);
        writer.write_all(&records).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.trim().split('\n').collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["rank"], 2);
        assert_eq!(second["query"], "red tie");
        assert_eq!(second["breakdown"]["composition"], 1.0);
    }

    #[test]
    fn test_write_pretty_single_item() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, true);
        writer.write(&StructuredAttributes::default()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\n  \"colors\""));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("jsonl"), Some(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::parse("JSONL"), Some(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::parse("invalid"), None);
    }
}
