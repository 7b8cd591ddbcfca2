//! In-memory store: the ordered records of one source plus malformed-line bookkeeping.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AnalyzerError;
use crate::parser;
use crate::types::{IngestReport, MalformedLine, Record};

/// Records in source order. Accepted records are never dropped or reordered.
#[derive(Debug, Default)]
pub struct LogStore {
  records: Vec<Record>,
  malformed: Vec<MalformedLine>,
  malformed_count: usize,
  lines_seen: usize,
  skip_blank_lines: bool,
  max_retained_malformed: Option<usize>,
}

impl LogStore {
  pub fn new() -> Self {
    Self::with_config(&Config::default())
  }

  pub fn with_config(config: &Config) -> Self {
    Self {
      skip_blank_lines: config.skip_blank_lines,
      max_retained_malformed: config.max_retained_malformed,
      ..Self::default()
    }
  }

  /// Open `path` and ingest every line.
  ///
  /// Fails with `SourceUnavailable` if the file cannot be opened or a read
  /// fails partway; no partial store is returned.
  pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self, AnalyzerError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| AnalyzerError::source_unavailable(path, e))?;
    Self::read_from(BufReader::new(file), config)
      .map_err(|e| match e {
        AnalyzerError::Io(source) => AnalyzerError::source_unavailable(path, source),
        other => other,
      })
  }

  /// Ingest every line of `reader`. A read error (including invalid UTF-8)
  /// aborts with `Io`.
  ///
  /// `\r\n`, `\r` and `\n` all end a line.
  pub fn read_from<R: BufRead>(mut reader: R, config: &Config) -> Result<Self, AnalyzerError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut store = Self::with_config(config);
    store.ingest(split_lines(&text));
    Ok(store)
  }

  /// Parse each line in order, appending matches and tallying the rest.
  ///
  /// A malformed line never aborts the pass.
  pub fn ingest<I, S>(&mut self, lines: I) -> IngestReport
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut report = IngestReport::default();

    for line in lines {
      self.lines_seen += 1;
      let trimmed = line.as_ref().trim();

      if trimmed.is_empty() && self.skip_blank_lines {
        continue;
      }

      match parser::parse_line(trimmed) {
        Some(record) => {
          debug!(line = self.lines_seen, level = record.level(), service = record.service(), "accepted");
          self.records.push(record);
          report.accepted += 1;
        }
        None => {
          debug!(line = self.lines_seen, raw = trimmed, "malformed line");
          self.record_malformed(trimmed);
          report.malformed += 1;
        }
      }
    }

    if report.malformed > 0 {
      warn!(count = report.malformed, "malformed lines skipped");
    }
    info!(
      accepted = report.accepted,
      malformed = report.malformed,
      total_records = self.records.len(),
      "ingestion pass complete"
    );
    report
  }

  fn record_malformed(&mut self, raw: &str) {
    self.malformed_count += 1;
    let has_room = self
      .max_retained_malformed
      .map_or(true, |cap| self.malformed.len() < cap);
    if has_room {
      self.malformed.push(MalformedLine {
        line_number: self.lines_seen,
        raw: raw.to_string(),
      });
    }
  }

  pub fn records(&self) -> &[Record] {
    &self.records
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Exact number of malformed lines seen, including any not retained.
  pub fn malformed_count(&self) -> usize {
    self.malformed_count
  }

  pub fn malformed_lines(&self) -> &[MalformedLine] {
    &self.malformed
  }
}

/// Split on any of `\r\n`, `\r`, `\n`. A trailing terminator yields no empty line.
fn split_lines(text: &str) -> Vec<&str> {
  let mut out = Vec::new();
  let mut rest = text;
  while !rest.is_empty() {
    match rest.find(|c: char| c == '\r' || c == '\n') {
      Some(i) => {
        out.push(&rest[..i]);
        let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[i + skip..];
      }
      None => {
        out.push(rest);
        break;
      }
    }
  }
  out
}
