//! Commerce error types.

use thiserror::Error;

use crate::checkout::{FailureKind, ValidationErrors};

/// A failed gateway call, split by whether a retry could help.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Transport-level failure (connection, timeout, 5xx). Eligible for
    /// bounded automatic retry during order and payment-intent creation.
    #[error("{message}")]
    Transient { message: String },

    /// The backend answered and said no. Never auto-retried.
    #[error("{message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },
}

impl GatewayError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    pub fn rejected(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// The backend or transport message.
    pub fn message(&self) -> &str {
        match self {
            Self::Transient { message } | Self::Rejected { message, .. } => message,
        }
    }
}

/// Errors surfaced by the checkout flow.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// A flow is already in flight; re-entrant calls are suppressed.
    #[error("another checkout is already in progress")]
    Busy,

    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Customer or billing input failed validation; no network call was
    /// made.
    #[error("invalid checkout details: {0}")]
    Validation(ValidationErrors),

    /// Confirmation was requested before a flow produced an order.
    #[error("no active checkout flow")]
    NotStarted,

    /// Confirmation was requested before a payment intent exists.
    #[error("no payment intent available for confirmation")]
    MissingPaymentIntent,

    /// Order creation failed after exhausting retries.
    #[error("order creation failed: {0}")]
    OrderCreation(String),

    /// Payment-intent creation failed after exhausting retries.
    #[error("payment initialization failed: {0}")]
    PaymentIntent(String),

    /// The payment was confirmed as failed.
    #[error("payment failed: {message}")]
    PaymentFailed {
        kind: FailureKind,
        message: String,
    },

    /// The reconciliation status poll failed.
    #[error("payment status unavailable: {0}")]
    Status(String),
}
