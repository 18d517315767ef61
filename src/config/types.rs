use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_value;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    #[serde(alias = "ticks")]
    pub duration: Option<u64>,
    #[serde(alias = "requests_per_tick")]
    pub rate: Option<usize>,
    pub headers: Option<HeadersValue>,
    pub body: Option<String>,
    pub verbose: Option<bool>,
    pub requests: Option<u64>,
    pub tick_interval: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub idle_timeout: Option<DurationValue>,
    pub max_idle: Option<usize>,
    pub deadline: Option<DurationValue>,
}

/// Headers as a comma separated string or a list of `name:value` entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeadersValue {
    Joined(String),
    List(Vec<String>),
}

impl HeadersValue {
    pub(crate) fn joined(&self) -> String {
        match self {
            HeadersValue::Joined(value) => value.clone(),
            HeadersValue::List(entries) => entries.join(","),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &str) -> AppResult<Duration> {
        let parsed = match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text),
        };
        parsed.map_err(|source| {
            AppError::config(ConfigError::InvalidDuration {
                field: field.to_owned(),
                source,
            })
        })
    }
}
