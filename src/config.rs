//! Configuration types, CLI options, and tuning constants.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Default ceiling on simultaneously in-flight domain traversals.
///
/// Bounds outbound DNS query fan-out; traversals beyond the ceiling wait for
/// a slot to free up.
pub const MAX_CONCURRENCY: usize = 500;

/// Interval between progress log lines, in seconds.
pub const LOGGING_INTERVAL: u64 = 5;

/// DNS query timeout in seconds.
///
/// Applied to the resolver itself; a TXT lookup that times out surfaces as a
/// lookup error and the domain contributes no further includes.
pub const DNS_TIMEOUT_SECS: u64 = 10;

/// Default path for the rendered results file.
pub const DEFAULT_OUTPUT_PATH: &str = "results.txt";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: human-readable format with colors (default)
/// - `Json`: structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors
    Plain,
    /// Structured JSON, one object per line
    Json,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field
/// attributes. All options have sensible defaults and can be overridden via
/// command-line flags.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// spf_flattener domains.txt
///
/// # With custom output path and concurrency ceiling
/// spf_flattener domains.txt --output flattened.txt --max-concurrency 100
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "spf_flattener",
    about = "Flattens the SPF include: chain for a list of domains."
)]
pub struct Config {
    /// File with one domain per line, or '-' to read from stdin
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Output file, one result line per input domain
    #[arg(long, value_parser, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Maximum simultaneously in-flight domain traversals
    ///
    /// Each traversal issues sequential TXT lookups; the ceiling bounds the
    /// number of outstanding DNS queries across the whole run.
    #[arg(long, default_value_t = MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.txt"),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_concurrency: MAX_CONCURRENCY,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
