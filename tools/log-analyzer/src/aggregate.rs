//! Stateless queries over a store's records: tallies, top-by-frequency, date ranges.

use std::collections::HashMap;
use std::hash::Hash;

use crate::date;
use crate::error::AnalyzerError;
use crate::types::{MostCommonError, Record, Summary, Tally};

/// Level token that marks a record as an error. Matched exactly (case-sensitive).
pub const ERROR_LEVEL: &str = "ERROR";

/// Count records per level. Only observed levels appear.
pub fn tally_by_level(records: &[Record]) -> Tally {
  tally(records.iter().map(Record::level))
}

/// Count records per service. Only observed services appear.
pub fn tally_by_service(records: &[Record]) -> Tally {
  tally(records.iter().map(Record::service))
}

fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Tally {
  let mut out = Tally::new();
  for v in values {
    *out.entry(v.to_string()).or_insert(0) += 1;
  }
  out
}

/// The `k` most frequent items, count descending.
///
/// Ties go to the item seen first in `items`.
pub fn top_k_by_frequency<T, I>(items: I, k: usize) -> Vec<(T, u64)>
where
  T: Eq + Hash,
  I: IntoIterator<Item = T>,
{
  // item -> (count, first-occurrence index)
  let mut counts: HashMap<T, (u64, usize)> = HashMap::new();
  for (idx, item) in items.into_iter().enumerate() {
    counts.entry(item).or_insert((0, idx)).0 += 1;
  }

  let mut ranked: Vec<(T, u64, usize)> = counts
    .into_iter()
    .map(|(item, (count, first))| (item, count, first))
    .collect();
  ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
  ranked
    .into_iter()
    .take(k)
    .map(|(item, count, _)| (item, count))
    .collect()
}

/// The single most frequent item; `None` for empty input.
pub fn top_by_frequency<T, I>(items: I) -> Option<(T, u64)>
where
  T: Eq + Hash,
  I: IntoIterator<Item = T>,
{
  top_k_by_frequency(items, 1).into_iter().next()
}

/// Most frequent message among `ERROR` records, or `None` if there are none.
pub fn most_frequent_error(records: &[Record]) -> Option<MostCommonError> {
  let messages = records
    .iter()
    .filter(|r| r.level() == ERROR_LEVEL)
    .map(Record::message);
  top_by_frequency(messages).map(|(message, count)| MostCommonError {
    message: message.to_string(),
    count,
  })
}

/// Records whose timestamp lies in `[start, end]`, in store order.
///
/// Bounds must be `YYYY-MM-DD HH:MM:SS`. Record timestamps may also be a bare
/// date (midnight). A record timestamp matching neither form fails the call.
pub fn filter_records_by_date_range<'a>(
  records: &'a [Record],
  start: &str,
  end: &str,
) -> Result<Vec<&'a Record>, AnalyzerError> {
  let start_dt = date::parse_bound("start", start)?;
  let end_dt = date::parse_bound("end", end)?;

  let mut out = Vec::new();
  for record in records {
    let ts = date::parse_record_timestamp(record.timestamp())
      .ok_or_else(|| AnalyzerError::unparsable_timestamp(record.timestamp()))?;
    if start_dt <= ts && ts <= end_dt {
      out.push(record);
    }
  }
  Ok(out)
}

/// Same as [`filter_records_by_date_range`], formatted as reconstructed lines.
pub fn filter_by_date_range(
  records: &[Record],
  start: &str,
  end: &str,
) -> Result<Vec<String>, AnalyzerError> {
  Ok(
    filter_records_by_date_range(records, start, end)?
      .into_iter()
      .map(Record::to_string)
      .collect(),
  )
}

/// Level counts, service counts, and the most common error.
pub fn summarize(records: &[Record]) -> Summary {
  Summary {
    level_counts: tally_by_level(records),
    service_counts: tally_by_service(records),
    most_common_error: most_frequent_error(records),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Vec<Record> {
    vec![
      Record::new("2023-03-01 08:15:27", "ServiceA", "INFO", "Started processing request #123"),
      Record::new("2023-03-01 08:15:28", "ServiceB", "ERROR", "Null pointer exception"),
      Record::new("2023-03-01 08:20:05", "ServiceC", "WARN", "Disk usage is at 85%"),
    ]
  }

  fn errors(messages: &[&str]) -> Vec<Record> {
    messages
      .iter()
      .map(|m| Record::new("2023-03-01", "api", "ERROR", *m))
      .collect()
  }

  #[test]
  fn tallies_count_each_value() {
    let mut records = sample();
    records.push(Record::new("2023-03-01", "ServiceA", "INFO", "again"));

    let levels = tally_by_level(&records);
    assert_eq!(levels["INFO"], 2);
    assert_eq!(levels["ERROR"], 1);
    assert_eq!(levels["WARN"], 1);
    assert!(!levels.contains_key("DEBUG"));

    let services = tally_by_service(&records);
    assert_eq!(services["ServiceA"], 2);
    assert_eq!(services.values().sum::<u64>(), records.len() as u64);
  }

  #[test]
  fn tallies_of_empty_input_are_empty() {
    assert!(tally_by_level(&[]).is_empty());
    assert!(tally_by_service(&[]).is_empty());
  }

  #[test]
  fn most_frequent_error_single() {
    let e = most_frequent_error(&sample()).unwrap();
    assert_eq!(e.message, "Null pointer exception");
    assert_eq!(e.count, 1);
  }

  #[test]
  fn most_frequent_error_picks_max() {
    let e = most_frequent_error(&errors(&["X", "Y", "X"])).unwrap();
    assert_eq!((e.message.as_str(), e.count), ("X", 2));
  }

  #[test]
  fn most_frequent_error_tie_goes_to_first_seen() {
    let e = most_frequent_error(&errors(&["Y", "X", "X", "Y", "Z"])).unwrap();
    assert_eq!((e.message.as_str(), e.count), ("Y", 2));
  }

  #[test]
  fn most_frequent_error_absent_without_errors() {
    let records = vec![Record::new("2023-03-01", "api", "error", "lowercase is not ERROR")];
    assert!(most_frequent_error(&records).is_none());
    assert!(most_frequent_error(&[]).is_none());
  }

  #[test]
  fn top_k_orders_by_count_then_first_seen() {
    let top = top_k_by_frequency(["b", "a", "c", "a", "c", "d"], 3);
    assert_eq!(top, vec![("a", 2), ("c", 2), ("b", 1)]);
    assert!(top_k_by_frequency(Vec::<&str>::new(), 3).is_empty());
    assert_eq!(top_by_frequency(["z"]), Some(("z", 1)));
  }

  #[test]
  fn filter_returns_matching_lines_in_order() {
    let out = filter_by_date_range(&sample(), "2023-03-01 08:15:00", "2023-03-01 08:16:00").unwrap();
    assert_eq!(
      out,
      vec![
        "2023-03-01 08:15:27 - ServiceA - INFO - Started processing request #123",
        "2023-03-01 08:15:28 - ServiceB - ERROR - Null pointer exception",
      ]
    );
  }

  #[test]
  fn filter_bounds_are_inclusive() {
    let out = filter_by_date_range(&sample(), "2023-03-01 08:15:27", "2023-03-01 08:20:05").unwrap();
    assert_eq!(out.len(), 3);
  }

  #[test]
  fn filter_treats_date_only_as_midnight() {
    let records = vec![Record::new("2023-03-01", "api", "INFO", "midnight")];
    let hit = filter_by_date_range(&records, "2023-03-01 00:00:00", "2023-03-01 00:00:00").unwrap();
    assert_eq!(hit, vec!["2023-03-01 - api - INFO - midnight"]);
    let miss = filter_by_date_range(&records, "2023-03-01 00:00:01", "2023-03-02 00:00:00").unwrap();
    assert!(miss.is_empty());
  }

  #[test]
  fn filter_rejects_malformed_bounds() {
    let err = filter_by_date_range(&sample(), "March 1st", "2023-03-01 08:16:00").unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidDateBound { ref field, .. } if field == "start"));
    let err = filter_by_date_range(&sample(), "2023-03-01 08:15:00", "2023-03-01").unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidDateBound { ref field, .. } if field == "end"));
  }

  #[test]
  fn filter_fails_on_unparsable_record_timestamp() {
    let mut records = sample();
    records.push(Record::new("2023-03-01 08:15", "api", "INFO", "short"));
    let err = filter_by_date_range(&records, "2023-03-01 00:00:00", "2023-03-02 00:00:00").unwrap_err();
    match err {
      AnalyzerError::UnparsableRecordTimestamp { timestamp } => assert_eq!(timestamp, "2023-03-01 08:15"),
      other => panic!("unexpected error: {}", other),
    }
  }

  #[test]
  fn filter_with_inverted_range_is_empty() {
    let out = filter_by_date_range(&sample(), "2023-03-02 00:00:00", "2023-03-01 00:00:00").unwrap();
    assert!(out.is_empty());
  }

  #[test]
  fn summarize_bundles_aggregates() {
    let s = summarize(&sample());
    assert_eq!(s.level_counts.len(), 3);
    assert_eq!(s.service_counts.len(), 3);
    assert_eq!(s.most_common_error.unwrap().message, "Null pointer exception");
  }
}
