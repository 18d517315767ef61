use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::{
    Client, Method, Request, StatusCode, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::{
    args::HeaderMapping,
    error::{AppError, AppResult, HttpError},
    metrics::{Outcome, OutcomeSink},
};

/// The request every executor sends, validated once per run.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl RequestTemplate {
    /// POST with `content-type: application/json` when a body is present,
    /// GET otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when a header name or value is not valid HTTP.
    pub fn new(url: Url, headers: &HeaderMapping, body: Option<Bytes>) -> AppResult<Self> {
        let mut header_map = HeaderMap::with_capacity(headers.len().saturating_add(1));
        for (name, value) in headers.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderName {
                    name: name.to_owned(),
                    source: err,
                })
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderValue {
                    name: name.to_owned(),
                    source: err,
                })
            })?;
            header_map.insert(header_name, header_value);
        }

        let method = if body.is_some() {
            header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Method::POST
        } else {
            Method::GET
        };

        Ok(Self {
            method,
            url,
            headers: header_map,
            body,
        })
    }

    fn build(&self, client: &Client) -> reqwest::Result<Request> {
        let mut builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        if let Some(body) = self.body.as_ref() {
            builder = builder.body(body.clone());
        }
        builder.build()
    }
}

/// Status line text for a response, e.g. `200 OK`.
#[must_use]
pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(
        || status.as_u16().to_string(),
        |reason| format!("{} {}", status.as_u16(), reason),
    )
}

/// Sends one request and delivers its outcome to `sink`.
///
/// Latency covers only the call itself. Transport failures are logged and
/// leave no outcome. Returns whether an outcome was recorded.
pub async fn execute_request(
    client: &Client,
    template: &RequestTemplate,
    sink: &OutcomeSink,
    verbose: bool,
) -> bool {
    let request = match template.build(client) {
        Ok(request) => request,
        Err(err) => {
            error!("Failed to build request: {}", err);
            return false;
        }
    };

    let start = Instant::now();
    let result = client.execute(request).await;
    let elapsed = start.elapsed();

    match result {
        Ok(response) => {
            let outcome = Outcome::new(status_text(response.status()), elapsed);
            if verbose {
                info!("{} Elapsed: {}ms", outcome.status, outcome.latency_ms);
            }
            let recorded = sink.record(outcome);
            if let Err(err) = drain_response_body(response).await {
                debug!("Failed to read response body: {}", err);
            }
            recorded
        }
        Err(err) => {
            error!("Request failed: {}", err);
            false
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
