//! Core library for the `tickload` CLI.
//!
//! `tickload` fires a fixed number of concurrent HTTP requests per tick for a
//! fixed number of ticks (or a flat request count), collects the status and
//! latency of every completed call, and prints a percentile summary. The
//! binary is a thin wrapper around [`entry::run`].
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod shutdown;
pub mod shutdown_handlers;
