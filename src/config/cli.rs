//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// http-retry: send one HTTP request, retrying transient failures
///
/// Network errors and 5xx responses are retried with linear backoff;
/// any other response is printed as received.
#[derive(Debug, Parser)]
#[command(name = "http-retry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target URL
    #[arg(long)]
    pub url: Option<String>,

    /// HTTP method
    #[arg(long, short = 'X')]
    pub method: Option<String>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", short = 'H', value_name = "K=V")]
    pub headers: Vec<String>,

    /// Inline request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// File whose contents are streamed as the request body
    #[arg(long = "data-file", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Total number of attempts
    #[arg(long)]
    pub retries: Option<u32>,

    /// Backoff unit in seconds (delay after attempt N is N * unit)
    #[arg(long)]
    pub backoff: Option<u32>,

    /// Per-attempt timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for http-retry
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "http-retry.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
