//! Date parsing utilities for range queries.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::AnalyzerError;

/// Canonical full form: `YYYY-MM-DD HH:MM:SS`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date-only form, read as midnight.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a range bound. Only the full datetime form is accepted.
pub fn parse_bound(field: &str, value: &str) -> Result<NaiveDateTime, AnalyzerError> {
  NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|e| {
    AnalyzerError::invalid_bound(field, value, &format!("expected YYYY-MM-DD HH:MM:SS: {}", e))
  })
}

/// Parse a record's raw timestamp: full form first, then date-only at midnight.
pub fn parse_record_timestamp(s: &str) -> Option<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
    .ok()
    .or_else(|| {
      NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).unwrap()
  }

  #[test]
  fn bound_requires_full_form() {
    assert_eq!(parse_bound("start", "2023-03-01 08:15:00").unwrap(), dt("2023-03-01 08:15:00"));
    let err = parse_bound("start", "2023-03-01").unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidDateBound { ref field, .. } if field == "start"));
    assert!(parse_bound("end", "not-a-date").is_err());
  }

  #[test]
  fn record_timestamp_full_form() {
    assert_eq!(parse_record_timestamp("2023-03-01 08:15:27"), Some(dt("2023-03-01 08:15:27")));
  }

  #[test]
  fn record_timestamp_date_only_is_midnight() {
    assert_eq!(parse_record_timestamp("2023-03-01"), Some(dt("2023-03-01 00:00:00")));
  }

  #[test]
  fn record_timestamp_rejects_other_shapes() {
    assert_eq!(parse_record_timestamp("2023-03-01 08:15"), None);
    assert_eq!(parse_record_timestamp("2023-13-01"), None);
    assert_eq!(parse_record_timestamp("12345"), None);
  }
}
