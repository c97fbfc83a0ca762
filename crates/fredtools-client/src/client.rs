//! FRED API client.

use std::sync::Arc;
use std::time::Duration;

use fredtools_types::Result;
use serde_json::Value;

use crate::url::endpoint_url;
use crate::{FredConfig, HttpTransport, Params, Transport, context};

/// Client for the FRED API.
///
/// Cloning is cheap; clones share the transport.
#[derive(Debug, Clone)]
pub struct FredClient {
    config: Arc<FredConfig>,
    transport: Arc<dyn Transport>,
}

impl FredClient {
    /// Creates a client that talks HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: FredConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client with a custom transport.
    #[must_use]
    pub fn with_transport(config: FredConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Creates an HTTP client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `FRED_API_KEY` is missing or the HTTP client cannot be created.
    pub fn from_env() -> Result<Self> {
        Self::new(FredConfig::from_env()?)
    }

    /// Returns the current client of this thread.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NoCurrentClient`](fredtools_types::FredError::NoCurrentClient)
    /// if none is registered.
    pub fn current() -> Result<Self> {
        context::current_client()
    }

    /// Registers this client as the current client of this thread.
    pub fn register_default(&self) {
        context::set_default_client(self.clone());
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &FredConfig {
        &self.config
    }

    /// Returns the full URL for an endpoint.
    #[must_use]
    pub fn build_url(&self, endpoint: &str) -> String {
        endpoint_url(&self.config.base_url, endpoint)
    }

    /// Prepares the parameters sent with every request: API key and JSON
    /// response format first, then the caller's parameters.
    #[must_use]
    pub fn build_params(&self, params: Params) -> Params {
        Params::new()
            .with("api_key", &self.config.api_key)
            .with("file_type", "json")
            .merge(params)
    }

    /// Requests an endpoint with the configured default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub fn request(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.request_with_timeout(endpoint, params, self.config.timeout)
    }

    /// Requests an endpoint with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub fn request_with_timeout(
        &self,
        endpoint: &str,
        params: Params,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let url = self.build_url(endpoint);
        tracing::debug!(endpoint, params = params.len(), "FRED request");
        let params = self.build_params(params);
        self.transport.get(&url, &params, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FnTransport;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_client_creation() {
        assert!(FredClient::new(FredConfig::new("key")).is_ok());
    }

    #[test]
    fn test_build_url_strips_extra_slashes() {
        let client = FredClient::new(FredConfig::new("k").with_base_url("https://example.com/"))
            .unwrap();
        assert_eq!(
            client.build_url("/release/data"),
            "https://example.com/release/data"
        );
    }

    #[test]
    fn test_build_params_injects_key_and_format() {
        let client = FredClient::new(FredConfig::new("k")).unwrap();
        let params = client.build_params(Params::new().with("foo", "bar").with_opt::<&str>("none", None));
        assert_eq!(
            params.as_pairs(),
            &[
                ("api_key".to_string(), "k".to_string()),
                ("file_type".to_string(), "json".to_string()),
                ("foo".to_string(), "bar".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_invokes_transport_with_prepared_values() {
        let captured: Arc<Mutex<Vec<(String, Params, Option<Duration>)>>> = Arc::default();
        let sink = Arc::clone(&captured);
        let transport = FnTransport(
            move |url: &str, params: &Params, timeout: Option<Duration>| -> Result<Value> {
                sink.lock()
                    .unwrap()
                    .push((url.to_string(), params.clone(), timeout));
                Ok(json!({ "ok": "yes" }))
            },
        );
        let client = FredClient::with_transport(
            FredConfig::new("k").with_base_url("https://example.org"),
            Arc::new(transport),
        );

        let result = client
            .request_with_timeout(
                "release/series",
                Params::new().with("limit", 10),
                Some(Duration::from_millis(2500)),
            )
            .unwrap();

        assert_eq!(result, json!({ "ok": "yes" }));
        let calls = captured.lock().unwrap();
        let (url, params, timeout) = &calls[0];
        assert_eq!(url, "https://example.org/release/series");
        assert_eq!(*timeout, Some(Duration::from_millis(2500)));
        assert_eq!(params.get("api_key"), Some("k"));
        assert_eq!(params.get("file_type"), Some("json"));
        assert_eq!(params.get("limit"), Some("10"));
    }

    #[test]
    fn test_request_uses_configured_timeout() {
        let transport = FnTransport(
            |_: &str, _: &Params, timeout: Option<Duration>| -> Result<Value> {
                Ok(json!(timeout.map(|t| t.as_secs())))
            },
        );
        let client = FredClient::with_transport(
            FredConfig::new("k").with_timeout(Some(Duration::from_secs(7))),
            Arc::new(transport),
        );
        assert_eq!(client.request("series", Params::new()).unwrap(), json!(7));
    }
}
