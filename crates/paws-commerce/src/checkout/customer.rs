//! Customer and billing details collected at checkout.

use serde::{Deserialize, Serialize};

/// Contact details for the buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    /// UAE mobile number; validated before any network call.
    pub phone: String,
    /// Optional Emirates ID (784-YYYY-XXXXXXX-X).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emirates_id: Option<String>,
}

impl CustomerInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            emirates_id: None,
        }
    }
}

/// Billing/delivery address.
///
/// The storefront ships within the UAE only, so the address is
/// emirate-based rather than free-form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub street: String,
    pub city: String,
    pub emirate: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl BillingAddress {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        emirate: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            emirate: emirate.into(),
            country: "UAE".to_string(),
            postal_code: None,
        }
    }
}
