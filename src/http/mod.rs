//! HTTP request execution and tick-paced scheduling.
mod client;
mod config;
mod executor;
mod rate;
mod scheduler;

#[cfg(test)]
mod test_support;

pub use client::build_client;
pub use config::{ClientSettings, LoadPlan, RunConfig};
pub use executor::{RequestTemplate, execute_request, status_text};
pub use scheduler::{RateScheduler, ScheduleReport};
