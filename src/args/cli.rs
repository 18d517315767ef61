use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::defaults::DEFAULT_COUNT_REQUESTS;
use super::parsers::{parse_duration_arg, parse_positive_u64, parse_positive_usize};
use super::types::{HeaderMapping, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fixed-rate HTTP load generator: sends N concurrent requests per tick and reports latency percentiles and status counts."
)]
pub struct TesterArgs {
    /// Target URL (alternative to the positional URL)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Target URL
    #[arg(value_name = "URL")]
    pub target: Option<String>,

    /// Number of ticks to run (one wave of requests per tick)
    #[arg(
        long = "duration",
        short = 'd',
        default_value = "1",
        value_parser = parse_positive_u64
    )]
    pub duration: PositiveU64,

    /// Concurrent requests issued per tick
    #[arg(
        long = "rate",
        short = 'c',
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub rate: PositiveUsize,

    /// Request headers as comma separated 'name:value' pairs
    #[arg(long, short = 'H', default_value = "")]
    pub headers: HeaderMapping,

    /// File whose bytes are sent as the request body (switches to POST)
    #[arg(long = "body")]
    pub body: Option<PathBuf>,

    /// Print one line per request (sets log level to debug unless overridden by TICKLOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Send a flat number of requests with no pacing, after one warm-up call (`-r` alone sends 10, `-r=N` sets the count)
    #[arg(
        long = "requests",
        short = 'r',
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_COUNT_REQUESTS,
        value_parser = parse_positive_u64,
        conflicts_with = "duration"
    )]
    pub requests: Option<PositiveU64>,

    /// Length of one tick (supports ms/s/m/h)
    #[arg(
        long = "tick-interval",
        default_value = "1s",
        value_parser = parse_duration_arg
    )]
    pub tick_interval: Duration,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// How long idle pooled connections are kept (supports ms/s/m/h)
    #[arg(
        long = "idle-timeout",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub idle_timeout: Duration,

    /// Maximum idle connections kept per host
    #[arg(long = "max-idle", default_value = "10")]
    pub max_idle: usize,

    /// Stop waiting for in-flight requests this long after the last tick (supports ms/s/m/h)
    #[arg(long = "deadline", value_parser = parse_duration_arg)]
    pub deadline: Option<Duration>,

    /// Path to config file (TOML/JSON). Defaults to ./tickload.toml or ./tickload.json if present.
    #[arg(long)]
    pub config: Option<String>,
}

impl TesterArgs {
    /// The target URL, preferring `--url` over the positional argument.
    #[must_use]
    pub fn target_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or(self.target.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}
