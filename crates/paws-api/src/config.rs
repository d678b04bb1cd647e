//! Client configuration.

use crate::{RetryPolicy, TimeoutConfig};

/// Default backend base URL (development).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "PAWS_API_URL";

/// Environment variable carrying the bearer token.
pub const AUTH_TOKEN_ENV: &str = "PAWS_API_TOKEN";

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash (e.g. `http://host:5000/api`).
    pub base_url: String,
    /// Bearer token sent as `Authorization` when present.
    pub auth_token: Option<String>,
    pub timeout: TimeoutConfig,
    /// Client-level retry; defaults to none — the checkout flow owns the
    /// retry budget for its calls.
    pub retry: RetryPolicy,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: TimeoutConfig::default(),
            retry: RetryPolicy::none(),
        }
    }

    /// Read base URL and token from the environment, falling back to the
    /// development defaults.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let auth_token = std::env::var(AUTH_TOKEN_ENV).ok();
        Self {
            auth_token,
            ..Self::new(base_url)
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
