//! Core types for the log analyzer (decoded records + summary contracts).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Decoded records
// ---------------------------------------------------------------------------

/// One decoded log line: `timestamp - service - level - message`.
///
/// Only [`crate::parser::parse_line`] builds these outside the crate, so every
/// Record matches the line grammar. Fields are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  timestamp: String,
  service: String,
  level: String,
  message: String,
}

impl Record {
  /// Unchecked; callers inside the crate pass grammar-valid fields.
  pub(crate) fn new(
    timestamp: impl Into<String>,
    service: impl Into<String>,
    level: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self {
      timestamp: timestamp.into(),
      service: service.into(),
      level: level.into(),
      message: message.into(),
    }
  }

  /// Raw timestamp text, exactly as it appeared in the line.
  pub fn timestamp(&self) -> &str {
    &self.timestamp
  }

  pub fn service(&self) -> &str {
    &self.service
  }

  pub fn level(&self) -> &str {
    &self.level
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

/// Reconstructs the source line.
impl fmt::Display for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} - {} - {} - {}",
      self.timestamp, self.service, self.level, self.message
    )
  }
}

/// A line that did not match the grammar, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
  /// 1-based position in the source.
  pub line_number: usize,
  /// The line after whitespace trimming.
  pub raw: String,
}

/// Counts for one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
  pub accepted: usize,
  pub malformed: usize,
}

// ---------------------------------------------------------------------------
// Aggregates (derived views, never stored on the store)
// ---------------------------------------------------------------------------

/// Frequency of each distinct field value. Keys are sorted for stable output.
pub type Tally = BTreeMap<String, u64>;

/// The most frequent ERROR message and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostCommonError {
  pub message: String,
  pub count: u64,
}

/// Serialized as a `[message, count]` pair.
impl Serialize for MostCommonError {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    (&self.message, self.count).serialize(serializer)
  }
}

/// `('message', count)`, switching to double quotes when the message holds a
/// single quote and no double quote; otherwise `'` and `\\` are escaped.
impl fmt::Display for MostCommonError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let quote = if self.message.contains('\'') && !self.message.contains('"') {
      '"'
    } else {
      '\''
    };
    write!(f, "({}", quote)?;
    for ch in self.message.chars() {
      if ch == quote || ch == '\\' {
        write!(f, "\\")?;
      }
      write!(f, "{}", ch)?;
    }
    write!(f, "{}, {})", quote, self.count)
  }
}

// ---------------------------------------------------------------------------
// Output types (what the renderers consume)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
  #[serde(rename = "Log Level Counts")]
  pub level_counts: Tally,
  #[serde(rename = "Service Counts")]
  pub service_counts: Tally,
  #[serde(rename = "Most Common Error")]
  pub most_common_error: Option<MostCommonError>,
}
