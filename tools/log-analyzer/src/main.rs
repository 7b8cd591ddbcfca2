//! Binary entrypoint: ingest one log file, print or write its summary.
//!
//! Malformed lines go to stderr. With `--start/--end`, matching lines are
//! printed after the summary.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use log_analyzer::{aggregate, report, AnalyzerError, Config, LogStore, OutputFormat};

/// Summarize a structured application log file.
#[derive(Parser, Debug)]
#[command(name = "log-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log file to analyze.
  path: PathBuf,

  /// Summary format.
  #[arg(short, long, value_enum, default_value_t = Format::Console)]
  format: Format,

  /// Destination for csv/json output (defaults to log_summary.csv / log_summary.json).
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Range start, "YYYY-MM-DD HH:MM:SS" (inclusive).
  #[arg(long, requires = "end")]
  start: Option<String>,

  /// Range end, "YYYY-MM-DD HH:MM:SS" (inclusive).
  #[arg(long, requires = "start")]
  end: Option<String>,

  /// Skip blank lines instead of reporting them as malformed.
  #[arg(long)]
  skip_blank: bool,

  /// Keep at most this many malformed lines for printing (the count stays exact).
  #[arg(long)]
  max_malformed: Option<usize>,

  /// Do not print malformed lines to stderr.
  #[arg(long)]
  quiet_malformed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
  Console,
  Csv,
  Json,
}

impl From<Format> for OutputFormat {
  fn from(f: Format) -> Self {
    match f {
      Format::Console => OutputFormat::Console,
      Format::Csv => OutputFormat::Csv,
      Format::Json => OutputFormat::Json,
    }
  }
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      let _ = writeln!(io::stderr(), "log-analyzer: {}", e);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<(), AnalyzerError> {
  let config = Config {
    skip_blank_lines: cli.skip_blank,
    max_retained_malformed: cli.max_malformed,
    ..Config::default()
  };

  let store = LogStore::open(&cli.path, &config)?;
  if !cli.quiet_malformed {
    let mut err = io::stderr().lock();
    for line in store.malformed_lines() {
      writeln!(err, "Malformed Line: {}", line.raw)?;
    }
  }

  let summary = aggregate::summarize(store.records());
  let format = OutputFormat::from(cli.format);
  match format {
    OutputFormat::Console => report::render(format, io::stdout().lock(), &summary)?,
    OutputFormat::Csv | OutputFormat::Json => {
      let dest = cli.output.unwrap_or_else(|| match format {
        OutputFormat::Csv => config.csv_path.clone(),
        _ => config.json_path.clone(),
      });
      let file = File::create(&dest)?;
      report::render(format, BufWriter::new(file), &summary)?;
      info!(path = %dest.display(), "summary written");
    }
  }

  if let (Some(start), Some(end)) = (cli.start.as_deref(), cli.end.as_deref()) {
    let lines = aggregate::filter_by_date_range(store.records(), start, end)?;
    let mut out = io::stdout().lock();
    writeln!(out, "Filtered Logs:")?;
    for line in lines {
      writeln!(out, "{}", line)?;
    }
  }

  Ok(())
}
