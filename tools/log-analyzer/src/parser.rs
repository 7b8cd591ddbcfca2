//! Line grammar: `timestamp - service - level - message`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Record;

/// Anchored at both ends. The message group is greedy, so a message containing
/// ` - ` keeps it instead of being split into extra fields.
static LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^(?P<timestamp>[\d\- :]+) - (?P<service>\w+) - (?P<level>\w+) - (?P<message>.+)$")
    .unwrap_or_else(|_| unreachable!())
});

/// Parse one raw line into a Record.
///
/// Surrounding whitespace is trimmed first. Returns `None` when the line does
/// not match the grammar; the caller decides how to report it. Timestamps are
/// not validated and any word token is accepted as a level.
pub fn parse_line(line: &str) -> Option<Record> {
  let caps = LINE_REGEX.captures(line.trim())?;
  Some(Record::new(
    &caps["timestamp"],
    &caps["service"],
    &caps["level"],
    &caps["message"],
  ))
}
