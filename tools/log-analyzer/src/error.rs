//! Structured error types for the log analyzer.
//!
//! Malformed lines are not errors: the store absorbs and counts them. Everything
//! here stops the operation that raised it.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
  #[error("cannot read {}: {source}", .path.display())]
  SourceUnavailable {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid date bound: {field}={value:?}: {reason}")]
  InvalidDateBound {
    field: String,
    value: String,
    reason: String,
  },

  #[error("unparsable record timestamp: {timestamp:?}")]
  UnparsableRecordTimestamp { timestamp: String },

  #[error("io: {0}")]
  Io(#[from] io::Error),

  #[error("csv: {0}")]
  Csv(#[from] csv::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl AnalyzerError {
  pub fn source_unavailable(path: impl AsRef<Path>, source: io::Error) -> Self {
    Self::SourceUnavailable {
      path: path.as_ref().to_path_buf(),
      source,
    }
  }

  pub fn invalid_bound(field: &str, value: &str, reason: &str) -> Self {
    Self::InvalidDateBound {
      field: field.to_string(),
      value: value.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn unparsable_timestamp(timestamp: impl Into<String>) -> Self {
    Self::UnparsableRecordTimestamp {
      timestamp: timestamp.into(),
    }
  }
}
