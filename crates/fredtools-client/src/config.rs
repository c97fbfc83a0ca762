//! Client configuration.

use std::time::Duration;

use fredtools_types::{FredError, Result};

use crate::url::BASE_URL;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FRED_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "FRED_BASE_URL";

/// Configuration for [`FredClient`](crate::FredClient).
#[derive(Clone)]
pub struct FredConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL all endpoints are resolved against.
    pub base_url: String,
    /// Default request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("fredtools/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl std::fmt::Debug for FredConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl FredConfig {
    /// Creates a configuration with the given API key and defaults elsewhere.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from `FRED_API_KEY` and `FRED_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `FRED_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FredError::Config(format!("{API_KEY_ENV} is not set")))?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
        {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the default request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
