//! Log parsing for gossip host message logs.
//!
//! A host writes one line per received message. Lines carrying the marker are
//! turned into [`MessageLogRecord`]s; every other line is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::AnalysisError;
use super::types::*;

/// Parser for message-delivery log lines
#[derive(Debug, Clone)]
pub struct LogLineParser {
    marker: String,
}

impl Default for LogLineParser {
    fn default() -> Self {
        Self::new(LOG_LINE_LEADER)
    }
}

impl LogLineParser {
    /// Create a parser for lines carrying `marker`.
    ///
    /// An empty marker matches nothing, so every line is treated as irrelevant.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Parse a single line.
    ///
    /// Returns `Ok(None)` when the line does not carry the marker.
    pub fn parse(&self, line: &str) -> Result<Option<MessageLogRecord>, AnalysisError> {
        if self.marker.is_empty() || !line.contains(self.marker.as_str()) {
            return Ok(None);
        }

        let stripped = line.replace(self.marker.as_str(), "");
        let fields: Vec<&str> = stripped.split(',').collect();
        if fields.len() != LOG_LINE_FIELDS {
            return Err(AnalysisError::malformed(
                line,
                format!("expected {} fields, found {}", LOG_LINE_FIELDS, fields.len()),
            ));
        }

        // str::parse::<u64> accepts a leading '+'; unsigned fields never carry a sign
        let seq_no: u64 = Some(fields[3])
            .filter(|s| !s.starts_with('+'))
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| AnalysisError::malformed(line, format!("seq_no '{}' is not a u64", fields[3])))?;
        let nano_time: i64 = fields[4]
            .parse()
            .map_err(|_| AnalysisError::malformed(line, format!("nano_time '{}' is not an i64", fields[4])))?;
        let seq: i64 = fields[5]
            .parse()
            .map_err(|_| AnalysisError::malformed(line, format!("seq '{}' is not an integer", fields[5])))?;

        Ok(Some(MessageLogRecord {
            host_id: fields[0].to_string(),
            sender_id: fields[1].to_string(),
            message_id: fields[2].to_string(),
            seq_no,
            nano_time,
            seq,
        }))
    }

    /// Parse every line of a reader, stopping at the first malformed line.
    ///
    /// Lines are read as raw bytes without a length limit; invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn parse_reader<R: BufRead>(
        &self,
        mut reader: R,
    ) -> Result<(Vec<MessageLogRecord>, LineStats), AnalysisError> {
        let mut records = Vec::new();
        let mut stats = LineStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            let line = String::from_utf8_lossy(&buf);
            stats.lines_read += 1;

            match self.parse(&line)? {
                Some(record) => {
                    stats.relevant_lines += 1;
                    records.push(record);
                }
                None => stats.irrelevant_lines += 1,
            }
        }

        log::debug!(
            "Read {} lines: {} message records, {} skipped",
            stats.lines_read,
            stats.relevant_lines,
            stats.irrelevant_lines
        );

        Ok((records, stats))
    }

    /// Parse a log file. The file is closed on every return path.
    pub fn parse_log_file(
        &self,
        path: &Path,
    ) -> Result<(Vec<MessageLogRecord>, LineStats), AnalysisError> {
        let file = File::open(path)?;
        self.parse_reader(BufReader::with_capacity(64 * 1024, file))
    }
}
