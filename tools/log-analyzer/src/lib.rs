//! Log Analyzer — batch statistics over structured application logs.
//!
//! Parses `timestamp - service - level - message` lines into records, keeps
//! them in source order, and answers aggregate queries: counts by level and
//! service, the most frequent ERROR message, and inclusive date-range filters.
//!
//! One source, fully in memory; no network.

pub mod aggregate;
pub mod config;
pub mod date;
pub mod error;
pub mod parser;
pub mod report;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::AnalyzerError;
pub use parser::parse_line;
pub use report::OutputFormat;
pub use store::LogStore;
pub use types::{MalformedLine, MostCommonError, Record, Summary, Tally};
