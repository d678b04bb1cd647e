//! HTTP transport.
//!
//! A small seam between the typed client and the wire so tests can
//! script responses. The real implementation drives a pooled hyper
//! HTTP/1 client.

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::{ApiError, TimeoutConfig};

/// A raw response: status plus collected body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes one HTTP request.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: http::Request<Vec<u8>>) -> Result<HttpResponse, ApiError>;
}

/// Transport backed by a hyper connection pool.
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    timeout: TimeoutConfig,
}

impl HyperTransport {
    pub fn new(timeout: TimeoutConfig) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            timeout,
        }
    }
}

#[async_trait]
impl HttpTransport for HyperTransport {
    async fn execute(&self, request: http::Request<Vec<u8>>) -> Result<HttpResponse, ApiError> {
        let (parts, body) = request.into_parts();
        let request = http::Request::from_parts(parts, Full::new(Bytes::from(body)));

        let response = tokio::time::timeout(self.timeout.total, self.client.request(request))
            .await
            .map_err(|_| ApiError::Timeout(self.timeout.total))?
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_bytes()
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
