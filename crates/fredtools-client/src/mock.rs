//! Canned-response transport for tests.
//!
//! ```ignore
//! use fredtools_client::Params;
//! use fredtools_client::mock::{StubResponse, StubTransport};
//! use serde_json::json;
//!
//! let stub = StubTransport::new([
//!     StubResponse::new("series", json!({ "seriess": [] })).expect_param("series_id", "GNPCA"),
//! ]);
//! let client = stub.client();
//! let body = client.request("series", Params::new().with("series_id", "GNPCA")).unwrap();
//! assert_eq!(body, json!({ "seriess": [] }));
//! stub.assert_complete();
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fredtools_types::{FredError, Result};
use serde_json::Value;

use crate::url::endpoint_url;
use crate::{FredClient, FredConfig, Params, Transport};

/// Base URL of clients built by [`StubTransport::client`].
pub const STUB_BASE_URL: &str = "https://stub.invalid/fred";

/// Parameter expectation attached to a [`StubResponse`].
#[derive(Debug, Clone)]
enum Expectation {
    Equals(String, String),
    Absent(String),
}

/// One canned response, served in order.
#[derive(Debug, Clone)]
pub struct StubResponse {
    endpoint: Option<String>,
    body: std::result::Result<Value, String>,
    expectations: Vec<Expectation>,
}

impl StubResponse {
    /// Serves `body` for a request to `endpoint`.
    #[must_use]
    pub fn new(endpoint: &str, body: Value) -> Self {
        Self {
            endpoint: Some(endpoint.to_string()),
            body: Ok(body),
            expectations: Vec::new(),
        }
    }

    /// Serves `body` for whatever endpoint comes next.
    #[must_use]
    pub fn any(body: Value) -> Self {
        Self {
            endpoint: None,
            body: Ok(body),
            expectations: Vec::new(),
        }
    }

    /// Fails the request to `endpoint` with an HTTP error.
    #[must_use]
    pub fn error(endpoint: &str, message: &str) -> Self {
        Self {
            endpoint: Some(endpoint.to_string()),
            body: Err(message.to_string()),
            expectations: Vec::new(),
        }
    }

    /// Asserts that the request carries `key=value`.
    #[must_use]
    pub fn expect_param(mut self, key: &str, value: impl ToString) -> Self {
        self.expectations
            .push(Expectation::Equals(key.to_string(), value.to_string()));
        self
    }

    /// Asserts that the request does not carry `key`.
    #[must_use]
    pub fn expect_absent(mut self, key: &str) -> Self {
        self.expectations.push(Expectation::Absent(key.to_string()));
        self
    }
}

/// A request seen by the stub.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Requested URL.
    pub url: String,
    /// Prepared parameters, including API key and format.
    pub params: Params,
    /// Timeout passed by the client.
    pub timeout: Option<Duration>,
}

/// Transport that replays canned responses and records every call.
///
/// Unexpected requests and failed expectations panic, which fails the
/// surrounding test.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<StubResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubTransport {
    /// Creates a stub serving `responses` in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = StubResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Creates a stub that fails the test on any request.
    #[must_use]
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Builds a client that sends every request to this stub.
    #[must_use]
    pub fn client(self: &Arc<Self>) -> FredClient {
        FredClient::with_transport(
            FredConfig::new("test-key").with_base_url(STUB_BASE_URL),
            Arc::clone(self) as Arc<dyn Transport>,
        )
    }

    /// Returns the requests seen so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Returns the number of requests seen so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Panics if some canned responses were never requested.
    pub fn assert_complete(&self) {
        let remaining: Vec<Option<String>> = self
            .responses
            .lock()
            .map(|r| r.iter().map(|s| s.endpoint.clone()).collect())
            .unwrap_or_default();
        assert!(
            remaining.is_empty(),
            "Unused stub responses remain: {remaining:?}"
        );
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, params: &Params, timeout: Option<Duration>) -> Result<Value> {
        let expected = self
            .responses
            .lock()
            .map_err(|_| FredError::Http("stub transport poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected request to {url}"));

        if let Some(endpoint) = &expected.endpoint {
            assert_eq!(
                url,
                endpoint_url(STUB_BASE_URL, endpoint),
                "Expected endpoint {endpoint:?}"
            );
        }
        for expectation in &expected.expectations {
            match expectation {
                Expectation::Equals(key, value) => assert_eq!(
                    params.get(key),
                    Some(value.as_str()),
                    "parameter {key:?} of {url}"
                ),
                Expectation::Absent(key) => assert!(
                    !params.contains(key),
                    "parameter {key:?} of {url} should be absent"
                ),
            }
        }

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                url: url.to_string(),
                params: params.clone(),
                timeout,
            });
        }

        expected.body.map_err(FredError::Http)
    }
}
