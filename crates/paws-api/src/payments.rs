//! Payment endpoints off the checkout happy path.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paws_commerce::money;
use paws_commerce::Money;

use crate::transport::HttpTransport;
use crate::{envelope, ApiClient, ApiError};

/// Body of `POST /payments/refund`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub payment_id: String,
    /// Partial refund amount; `None` refunds the full charge.
    #[serde(with = "money::float_option")]
    pub amount: Option<Money>,
    pub reason: String,
}

impl RefundRequest {
    /// Full refund with the default reason.
    pub fn new(payment_id: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
            amount: None,
            reason: "requested_by_customer".to_string(),
        }
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

/// Result of a refund request.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundResult {
    pub status: Option<String>,
}

/// Publishable processor configuration served to the storefront.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfig {
    #[serde(default)]
    pub publishable_key: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl<T: HttpTransport> ApiClient<T> {
    /// `POST /payments/refund`.
    pub async fn refund(&self, request: &RefundRequest) -> Result<RefundResult, ApiError> {
        let value = self.post("/payments/refund", request).await?;
        Ok(RefundResult {
            status: envelope::status(&value),
        })
    }

    /// `GET /payments/config`.
    pub async fn payment_config(&self) -> Result<PaymentConfig, ApiError> {
        let value = self.get("/payments/config").await?;
        parse_payment_config(&value)
    }
}

fn parse_payment_config(value: &Value) -> Result<PaymentConfig, ApiError> {
    serde_json::from_value(envelope::data(value).clone())
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::MockTransport;
    use crate::ApiConfig;
    use serde_json::json;

    fn client(transport: MockTransport) -> ApiClient<MockTransport> {
        ApiClient::with_transport(ApiConfig::new("http://backend/api"), transport)
    }

    #[test]
    fn test_refund_wire_shape() {
        let request = RefundRequest::new("pay_1").with_amount(Money::from_major(25));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["paymentId"], "pay_1");
        assert_eq!(value["amount"], json!(25.0));
        assert_eq!(value["reason"], "requested_by_customer");
    }

    #[tokio::test]
    async fn test_refund_roundtrip() {
        let client = client(MockTransport::replying(vec![(
            200,
            json!({"data": {"status": "refunded"}}),
        )]));
        let result = client.refund(&RefundRequest::new("pay_1")).await.unwrap();
        assert_eq!(result.status.as_deref(), Some("refunded"));
    }

    #[tokio::test]
    async fn test_payment_config_shapes() {
        let client = client(MockTransport::replying(vec![(
            200,
            json!({"data": {"publishableKey": "pk_test_1", "currency": "aed"}}),
        )]));
        let config = client.payment_config().await.unwrap();
        assert_eq!(config.publishable_key.as_deref(), Some("pk_test_1"));
        assert_eq!(config.currency.as_deref(), Some("aed"));

        let client = client_flat();
        let config = client.payment_config().await.unwrap();
        assert_eq!(config.publishable_key.as_deref(), Some("pk_test_2"));
    }

    fn client_flat() -> ApiClient<MockTransport> {
        client(MockTransport::replying(vec![(
            200,
            json!({"publishableKey": "pk_test_2"}),
        )]))
    }
}
