use reqwest::Client;

use crate::{
    args::DEFAULT_USER_AGENT,
    error::{AppError, AppResult, HttpError},
};

use super::config::ClientSettings;

/// Builds the client shared by every request of a run.
///
/// Compression is disabled so latency reflects the raw transfer.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built.
pub fn build_client(settings: &ClientSettings) -> AppResult<Client> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .pool_idle_timeout(Some(settings.idle_timeout))
        .pool_max_idle_per_host(settings.max_idle_per_host)
        .no_gzip()
        .no_brotli()
        .no_deflate()
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
