//! Transport seam between the client and the network.

use std::time::Duration;

use fredtools_types::{FredError, Result};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::{FredConfig, Params};

/// Performs one GET request and returns the decoded JSON body.
///
/// The client hands every transport a fully prepared parameter set; the
/// transport is only responsible for putting it on the wire.
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Fetches `url` with `params` as query string.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, error status or undecodable body.
    fn get(&self, url: &str, params: &Params, timeout: Option<Duration>) -> Result<Value>;
}

/// Adapts a plain function into a [`Transport`].
pub struct FnTransport<F>(pub F);

impl<F> std::fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnTransport")
    }
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(&str, &Params, Option<Duration>) -> Result<Value> + Send + Sync,
{
    fn get(&self, url: &str, params: &Params, timeout: Option<Duration>) -> Result<Value> {
        (self.0)(url, params, timeout)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates an HTTP transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &FredConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            // Per-request timeouts are applied on each call
            .timeout(None::<Duration>)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(http_error)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, params: &Params, timeout: Option<Duration>) -> Result<Value> {
        let mut request = self.client.get(url).query(params.as_pairs());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().map_err(http_error)?;
        let status = response.status();
        let body = response.text().map_err(http_error)?;

        if !status.is_success() {
            return Err(FredError::Api {
                status: status.as_u16(),
                message: api_error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string()),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Maps a reqwest error, dropping the URL so the API key never leaks into messages.
fn http_error(error: reqwest::Error) -> FredError {
    FredError::Http(error.without_url().to_string())
}

/// Extracts FRED's `error_message` from an error body.
fn api_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error_message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
