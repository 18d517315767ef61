use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, PositiveUsize, TesterArgs, parse_header_list};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given on the
/// command line always win.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if config.duration.is_some() && config.requests.is_some() {
        return Err(AppError::config(ConfigError::Conflict {
            left: "duration",
            right: "requests",
        }));
    }

    if !is_cli(matches, "url")
        && !is_cli(matches, "target")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    // A count run on the command line rules out a config tick count and vice versa.
    if !is_cli(matches, "duration")
        && !is_cli(matches, "requests")
        && let Some(duration) = config.duration
    {
        args.duration = ensure_positive_u64(duration, "duration")?;
    }

    if !is_cli(matches, "requests")
        && !is_cli(matches, "duration")
        && let Some(requests) = config.requests
    {
        args.requests = Some(ensure_positive_u64(requests, "requests")?);
    }

    if !is_cli(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = ensure_positive_usize(rate, "rate")?;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_header_list(&headers.joined());
    }

    if !is_cli(matches, "body")
        && let Some(body) = config.body.as_ref()
    {
        args.body = Some(PathBuf::from(body));
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "tick_interval")
        && let Some(value) = config.tick_interval.as_ref()
    {
        args.tick_interval = value.to_duration("tick_interval")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(value) = config.timeout.as_ref()
    {
        args.request_timeout = value.to_duration("timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(value) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = value.to_duration("connect_timeout")?;
    }

    if !is_cli(matches, "idle_timeout")
        && let Some(value) = config.idle_timeout.as_ref()
    {
        args.idle_timeout = value.to_duration("idle_timeout")?;
    }

    if !is_cli(matches, "max_idle")
        && let Some(max_idle) = config.max_idle
    {
        args.max_idle = max_idle;
    }

    if !is_cli(matches, "deadline")
        && let Some(value) = config.deadline.as_ref()
    {
        args.deadline = Some(value.to_duration("deadline")?);
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
