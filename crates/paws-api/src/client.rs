//! Typed backend client.

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::extract_error_message;
use crate::transport::{HttpTransport, HyperTransport};
use crate::{ApiConfig, ApiError};

/// JSON client for the storefront backend.
///
/// Wraps a transport with base-URL resolution, bearer auth, backend
/// error-message extraction, and the configured (opt-in) retry policy.
pub struct ApiClient<T: HttpTransport = HyperTransport> {
    config: ApiConfig,
    pub(crate) transport: T,
}

impl ApiClient {
    /// Create a client over the default hyper transport.
    pub fn new(config: ApiConfig) -> Self {
        let transport = HyperTransport::new(config.timeout.clone());
        Self { config, transport }
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Create a client over a custom transport (tests, instrumentation).
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.send(Method::POST, path, Some(bytes)).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.send(Method::PUT, path, Some(bytes)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut attempt = 0u32;

        loop {
            let request = self.build_request(&method, &url, body.clone())?;
            match self.execute_once(request).await {
                Ok(value) => return Ok(value),
                Err(e) if self.config.retry.should_retry(&e, attempt) => {
                    let delay = self.config.retry.backoff.delay_for_attempt(attempt);
                    attempt += 1;
                    warn!(%url, attempt, error = %e, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn build_request(
        &self,
        method: &Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<http::Request<Vec<u8>>, ApiError> {
        let mut builder = http::Request::builder()
            .method(method.clone())
            .uri(url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &self.config.auth_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        builder
            .body(body.unwrap_or_default())
            .map_err(|e| ApiError::Request(e.to_string()))
    }

    async fn execute_once(&self, request: http::Request<Vec<u8>>) -> Result<Value, ApiError> {
        let url = request.uri().to_string();
        let response = self.transport.execute(request).await?;
        debug!(%url, status = response.status, "backend response");

        if response.status == 401 {
            return Err(ApiError::Unauthorized);
        }
        if !(200..300).contains(&response.status) {
            let body: Value = serde_json::from_slice(&response.body).unwrap_or(Value::Null);
            let message = extract_error_message(
                &body,
                &format!("Request failed with status {}", response.status),
            );
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }

        if response.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}
