//! CLI surface and run configuration.

use crate::error::Error;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/run-query";
pub const DEFAULT_QUERY: &str =
    "df = pl.read_parquet('data/sample_0.parquet')\ndf = df.select(['name','age'])";

/// With no queries supplied, this many copies of [`DEFAULT_QUERY`] are
/// dispatched.
const DEFAULT_BATCH_SIZE: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "querybench")]
#[command(about = "Load-test an HTTP query-execution endpoint", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Target URL for all requests
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub url: String,

    /// Query to dispatch; repeat the flag to send several distinct queries
    #[arg(long = "query")]
    pub queries: Vec<String>,

    /// Newline-delimited file of queries, appended after any --query flags
    #[arg(long)]
    pub queries_file: Option<PathBuf>,

    /// Dispatch the assembled query list this many times over
    #[arg(long, default_value = "1")]
    pub repeat: usize,

    /// Cap on simultaneous in-flight requests (default: send all at once)
    #[arg(long)]
    pub concurrency_limit: Option<usize>,

    /// Per-request timeout, e.g. "30s" or "500ms"
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,

    /// Destination for the persisted summary
    #[arg(long, default_value = "load_test_summary.csv")]
    pub report: PathBuf,
}

/// The full configuration for one batch run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub endpoint_url: String,
    pub queries: Vec<String>,
    pub concurrency_limit: Option<usize>,
    pub per_request_timeout: Duration,
    pub report_destination: PathBuf,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, Error> {
        let mut base = cli.queries;
        if let Some(path) = &cli.queries_file {
            let contents = std::fs::read_to_string(path)?;
            base.extend(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            );
        }
        if base.is_empty() {
            base = vec![DEFAULT_QUERY.to_string(); DEFAULT_BATCH_SIZE];
        }

        let mut queries = Vec::with_capacity(base.len() * cli.repeat);
        for _ in 0..cli.repeat {
            queries.extend(base.iter().cloned());
        }

        Ok(Self {
            endpoint_url: cli.url,
            queries,
            concurrency_limit: cli.concurrency_limit,
            per_request_timeout: cli.timeout,
            report_destination: cli.report,
        })
    }
}
