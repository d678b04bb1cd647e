//! Backend REST client for the Paws storefront.
//!
//! Thin, typed access to the storefront backend: orders, payment
//! intents, confirmation, status, refunds, and processor configuration.
//! The client normalizes the backend's inconsistent response envelopes
//! at this boundary (see [`envelope`]) so the domain crate only ever
//! sees canonical shapes, and implements the domain's
//! `CommerceGateway` port.

mod catalog;
mod client;
mod config;
mod error;
pub mod envelope;
mod gateway;
mod payments;
mod retry;
mod timeout;
mod transport;

pub use client::ApiClient;
pub use config::{ApiConfig, AUTH_TOKEN_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{extract_error_message, ApiError};
pub use payments::{PaymentConfig, RefundRequest, RefundResult};
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use timeout::TimeoutConfig;
pub use transport::{HttpResponse, HttpTransport, HyperTransport};
