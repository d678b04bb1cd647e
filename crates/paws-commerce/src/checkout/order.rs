//! Order creation payloads.
//!
//! Wire shapes for `POST /orders` and `PUT /orders/{id}/status`, built
//! from a cart snapshot via the pricing engine. Field casing follows the
//! backend's camelCase contract; amounts go out as plain JSON numbers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;
use crate::checkout::{BillingAddress, CustomerInfo};
use crate::ids::ProductId;
use crate::money::{self, Money};
use crate::pricing::{vat_rate, OrderTotals, PricedItem};

/// How the order will be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment through the processor.
    Stripe,
    /// Pay the courier on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "stripe",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }
}

/// Payment state carried on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// Order lifecycle status on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Order priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Normal,
    Urgent,
}

/// Address as the order API expects it (`state` rather than `emirate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl From<&BillingAddress> for OrderAddress {
    fn from(address: &BillingAddress) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.emirate.clone(),
            country: if address.country.is_empty() {
                "UAE".to_string()
            } else {
                address.country.clone()
            },
        }
    }
}

/// One product line on the order, priced at the effective unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: ProductId,
    pub quantity: u32,
    #[serde(with = "money::float")]
    pub price: Money,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_type: OrderType,
    pub customer_name: String,
    pub contact_number: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emirates_id: Option<String>,
    pub delivery_address: OrderAddress,
    pub billing_address: OrderAddress,
    pub products: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
    #[serde(with = "money::float")]
    pub subtotal: Money,
    #[serde(with = "money::float")]
    pub tax_amount: Money,
    #[serde(with = "money::float")]
    pub total_amount: Money,
    #[serde(with = "money::float")]
    pub delivery_fee: Money,
    pub order_notes: String,
    pub payment_status: PaymentStatus,
    pub order_date: DateTime<Utc>,
}

impl CreateOrderRequest {
    /// Build an order payload from a cart snapshot.
    ///
    /// Totals come from the pricing engine at the fixed VAT rate; each
    /// line carries the effective (promotion-aware) unit price.
    pub fn build(
        items: &[CartLineItem],
        customer: &CustomerInfo,
        billing: &BillingAddress,
        payment_method: PaymentMethod,
    ) -> Self {
        let priced: Vec<PricedItem> = items.iter().map(PricedItem::from).collect();
        let totals = OrderTotals::calculate(&priced, vat_rate());

        let products = items
            .iter()
            .map(|item| OrderLine {
                product: item.id.clone(),
                quantity: item.quantity,
                price: item.effective_unit_price(),
            })
            .collect();

        let address = OrderAddress::from(billing);

        Self {
            order_type: OrderType::Normal,
            customer_name: customer.name.clone(),
            contact_number: customer.phone.clone(),
            email: customer.email.clone(),
            emirates_id: customer.emirates_id.clone(),
            delivery_address: address.clone(),
            billing_address: address,
            products,
            payment_method,
            subtotal: totals.subtotal,
            tax_amount: totals.vat_amount,
            total_amount: totals.total_amount,
            delivery_fee: Money::zero(),
            order_notes: String::new(),
            payment_status: PaymentStatus::Pending,
            order_date: Utc::now(),
        }
    }
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
    pub remarks: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRecord, Promotion};

    fn line(id: &str, price: i64, promo: Option<i64>, quantity: u32) -> CartLineItem {
        let record = CatalogRecord {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Money::from_major(price),
            promotion: promo.map(|p| Promotion {
                price: Money::from_major(p),
            }),
            stock_quantity: None,
            product_code: None,
            unit: None,
            category: None,
            sub_category: None,
            kind: Default::default(),
        };
        CartLineItem::from_record(&record, quantity)
    }

    fn customer() -> CustomerInfo {
        CustomerInfo::new("Sara Khan", "sara@example.com", "+971501234567")
    }

    #[test]
    fn test_build_uses_effective_prices() {
        let items = [line("p1", 100, None, 2), line("p2", 50, Some(40), 1)];
        let request = CreateOrderRequest::build(
            &items,
            &customer(),
            &BillingAddress::new("12 Al Wasl Road", "Dubai", "Dubai"),
            PaymentMethod::Stripe,
        );

        assert_eq!(request.products.len(), 2);
        assert_eq!(request.products[1].price, Money::from_major(40));
        assert_eq!(request.subtotal, Money::from_major(240));
        assert_eq!(request.tax_amount, Money::from_major(12));
        assert_eq!(request.total_amount, Money::from_major(252));
        assert_eq!(request.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_wire_shape() {
        let items = [line("p1", 100, None, 1)];
        let request = CreateOrderRequest::build(
            &items,
            &customer(),
            &BillingAddress::new("12 Al Wasl Road", "Dubai", "Dubai"),
            PaymentMethod::CashOnDelivery,
        );

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["paymentMethod"], "cash_on_delivery");
        assert_eq!(value["paymentStatus"], "pending");
        assert_eq!(value["deliveryAddress"]["state"], "Dubai");
        // Amounts are plain numbers on the wire.
        assert_eq!(value["subtotal"], serde_json::json!(100.0));
        assert_eq!(value["totalAmount"], serde_json::json!(105.0));
        assert!(value.get("emiratesId").is_none());
    }

    #[test]
    fn test_status_update_body() {
        let request = StatusUpdateRequest {
            status: OrderStatus::Cancelled,
            remarks: "Payment failed: card declined".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["status"], "cancelled");
    }
}
