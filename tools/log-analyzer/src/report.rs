//! Summary renderers: console text, two-column CSV, keyed JSON.
//!
//! Renderers only serialize a [`Summary`]; all counting happens in `aggregate`.

use std::io::Write;

use serde::Serialize;

use crate::error::AnalyzerError;
use crate::types::{Summary, Tally};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
  #[default]
  Console,
  Csv,
  Json,
}

pub fn render<W: Write>(format: OutputFormat, w: W, summary: &Summary) -> Result<(), AnalyzerError> {
  match format {
    OutputFormat::Console => write_console(w, summary),
    OutputFormat::Csv => write_csv(w, summary),
    OutputFormat::Json => write_json(w, summary),
  }
}

/// Human-readable `key: value` lines.
pub fn write_console<W: Write>(mut w: W, summary: &Summary) -> Result<(), AnalyzerError> {
  writeln!(w, "Log Summary:")?;
  write_tally(&mut w, "Log Level Counts", &summary.level_counts)?;
  write_tally(&mut w, "Service Counts", &summary.service_counts)?;
  if let Some(err) = &summary.most_common_error {
    writeln!(w, "Most Common Error: {}", err)?;
  }
  w.flush()?;
  Ok(())
}

fn write_tally<W: Write>(w: &mut W, label: &str, tally: &Tally) -> Result<(), AnalyzerError> {
  writeln!(w, "{}:", label)?;
  for (key, count) in tally {
    writeln!(w, "  {}: {}", key, count)?;
  }
  Ok(())
}

/// `Metric,Value` rows: levels, then services, then the most common error if any.
pub fn write_csv<W: Write>(w: W, summary: &Summary) -> Result<(), AnalyzerError> {
  let mut wtr = csv::Writer::from_writer(w);
  wtr.write_record(["Metric", "Value"])?;
  for (level, count) in &summary.level_counts {
    wtr.write_record([format!("Log Level - {}", level), count.to_string()])?;
  }
  for (service, count) in &summary.service_counts {
    wtr.write_record([format!("Service - {}", service), count.to_string()])?;
  }
  if let Some(err) = &summary.most_common_error {
    wtr.write_record(["Most Common Error".to_string(), err.to_string()])?;
  }
  wtr.flush()?;
  Ok(())
}

/// Pretty JSON object with keys `Log Level Counts`, `Service Counts`, `Most Common Error`.
pub fn write_json<W: Write>(mut w: W, summary: &Summary) -> Result<(), AnalyzerError> {
  let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
  let mut ser = serde_json::Serializer::with_formatter(&mut w, formatter);
  summary.serialize(&mut ser)?;
  writeln!(w)?;
  w.flush()?;
  Ok(())
}
