//! Backend gateway contract.
//!
//! The domain owns this port; `paws-api` provides the HTTP adapter. All
//! methods return canonical response shapes — the backend's inconsistent
//! response envelopes are normalized at the client boundary, never here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::checkout::{BillingAddress, CreateOrderRequest, CustomerInfo, StatusUpdateRequest};
use crate::error::GatewayError;
use crate::ids::{OrderId, PaymentIntentId};

/// Customer details as the payment-intent API expects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emirates_id: Option<String>,
}

impl From<&CustomerInfo> for ProcessorCustomer {
    fn from(info: &CustomerInfo) -> Self {
        Self {
            name: info.name.clone(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            emirates_id: info.emirates_id.clone(),
        }
    }
}

/// Billing address as the payment-intent API expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorBillingAddress {
    pub street: String,
    pub city: String,
    pub emirate: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl From<&BillingAddress> for ProcessorBillingAddress {
    fn from(address: &BillingAddress) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            emirate: address.emirate.clone(),
            country: "UAE".to_string(),
            postal_code: address.postal_code.clone(),
        }
    }
}

/// Body of `POST /payments/create-payment-intent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub order_id: OrderId,
    pub customer_info: ProcessorCustomer,
    pub billing_address: ProcessorBillingAddress,
}

/// Body of `POST /payments/confirm-payment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub payment_intent_id: PaymentIntentId,
    pub payment_method_id: String,
}

/// Canonical order-creation response.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreated {
    pub order_id: OrderId,
}

/// Canonical payment-intent response.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentCreated {
    pub payment_intent_id: PaymentIntentId,
    pub client_secret: String,
}

/// Canonical confirmation response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentConfirmed {
    /// Processor-reported status, when the backend relays one.
    pub status: Option<String>,
}

/// Canonical payment-status response (reconciliation poll).
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentStatusInfo {
    pub status: String,
}

/// The backend operations the checkout flow depends on.
#[async_trait]
pub trait CommerceGateway {
    /// `POST /orders`.
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderCreated, GatewayError>;

    /// `POST /payments/create-payment-intent`.
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentCreated, GatewayError>;

    /// `POST /payments/confirm-payment`.
    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> Result<PaymentConfirmed, GatewayError>;

    /// `PUT /orders/{id}/status`.
    async fn update_order_status(
        &self,
        order_id: &OrderId,
        request: &StatusUpdateRequest,
    ) -> Result<(), GatewayError>;

    /// `GET /payments/status/{id}`.
    async fn payment_status(
        &self,
        payment_intent_id: &PaymentIntentId,
    ) -> Result<PaymentStatusInfo, GatewayError>;
}
