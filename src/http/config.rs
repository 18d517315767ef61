use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Url;

use crate::{
    args::{HeaderMapping, TesterArgs},
    error::{AppError, AppResult, HttpError, ValidationError},
};

/// Everything one run needs, resolved and validated up front.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: Url,
    pub headers: HeaderMapping,
    /// Present only when the body file had content.
    pub body: Option<Bytes>,
    pub plan: LoadPlan,
    pub verbose: bool,
    pub client: ClientSettings,
    /// How long the join barrier waits after scheduling ends.
    pub deadline: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPlan {
    /// `per_tick` concurrent requests at the start of each of `ticks` ticks.
    Ticks {
        ticks: u64,
        per_tick: usize,
        interval: Duration,
    },
    /// One warm-up request, then the rest all at once.
    Count { total: u64 },
}

impl LoadPlan {
    #[must_use]
    pub fn planned_requests(&self) -> u64 {
        match *self {
            LoadPlan::Ticks {
                ticks, per_tick, ..
            } => ticks.saturating_mul(u64::try_from(per_tick).unwrap_or(u64::MAX)),
            LoadPlan::Count { total } => total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_idle_per_host: usize,
}

impl RunConfig {
    /// Resolves CLI/config arguments into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or invalid, or the body file
    /// cannot be read.
    pub fn from_args(args: &TesterArgs) -> AppResult<Self> {
        let target = resolve_target(args.target_url())?;
        let body = match args.body.as_deref() {
            Some(path) => read_body(path)?,
            None => None,
        };
        let plan = match args.requests {
            Some(total) => LoadPlan::Count { total: total.get() },
            None => LoadPlan::Ticks {
                ticks: args.duration.get(),
                per_tick: args.rate.get(),
                interval: args.tick_interval,
            },
        };

        Ok(Self {
            target,
            headers: args.headers.clone(),
            body,
            plan,
            verbose: args.verbose,
            client: ClientSettings {
                request_timeout: args.request_timeout,
                connect_timeout: args.connect_timeout,
                idle_timeout: args.idle_timeout,
                max_idle_per_host: args.max_idle,
            },
            deadline: args.deadline,
        })
    }
}

fn resolve_target(url: Option<&str>) -> AppResult<Url> {
    let url = url.ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
    let parsed = Url::parse(url).map_err(|err| {
        AppError::http(HttpError::InvalidUrl {
            url: url.to_owned(),
            source: err,
        })
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(AppError::http(HttpError::UnsupportedScheme {
            url: url.to_owned(),
        })),
    }
}

fn read_body(path: &Path) -> AppResult<Option<Bytes>> {
    let content = std::fs::read(path).map_err(|err| {
        AppError::http(HttpError::ReadBodyFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    if content.is_empty() {
        return Ok(None);
    }
    Ok(Some(Bytes::from(content)))
}
