//! Analyzer configuration with sane defaults.

use std::path::PathBuf;

/// Ingestion and output settings.
#[derive(Debug, Clone)]
pub struct Config {
  /// Skip empty lines instead of counting them as malformed.
  pub skip_blank_lines: bool,
  /// Cap on raw malformed lines kept for diagnostics. The malformed count stays exact.
  pub max_retained_malformed: Option<usize>,
  /// Default destination for the CSV summary.
  pub csv_path: PathBuf,
  /// Default destination for the JSON summary.
  pub json_path: PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      skip_blank_lines: false,
      max_retained_malformed: None,
      csv_path: PathBuf::from("log_summary.csv"),
      json_path: PathBuf::from("log_summary.json"),
    }
  }
}
