//! Cart line items and quantity caps.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRecord;
use crate::ids::ProductId;
use crate::money::Money;

/// Maximum quantity of any one product per order, regardless of stock.
pub const GLOBAL_MAX_PER_PRODUCT: u32 = 5;

/// Why an add or quantity update was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitReason {
    /// The line is already at its cap.
    MaximumReached,
    /// The request would cross the global per-product limit.
    MaxLimit,
    /// The request would cross the available stock.
    StockLimit,
}

impl LimitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitReason::MaximumReached => "maximum_reached",
            LimitReason::MaxLimit => "max_limit",
            LimitReason::StockLimit => "stock_limit",
        }
    }

    /// Message shown to the buyer when the limit applies.
    pub fn user_message(&self) -> &'static str {
        match self {
            LimitReason::MaximumReached => {
                "You already have the maximum quantity of this item in your cart"
            }
            LimitReason::MaxLimit => "Only 5 of each item can be added per order",
            LimitReason::StockLimit => "Not enough stock to add more of this item",
        }
    }
}

/// The cap for a line given its stock level.
///
/// Absent stock means unlimited for capping purposes, so only the global
/// limit applies.
pub fn max_allowed_for_stock(stock_quantity: Option<u32>) -> u32 {
    GLOBAL_MAX_PER_PRODUCT.min(stock_quantity.unwrap_or(GLOBAL_MAX_PER_PRODUCT))
}

/// Pick the rejection reason for a capped request.
///
/// Stock wins whenever it is the binding constraint; otherwise a line
/// already at its cap reports `MaximumReached`, and a request that would
/// cross the cap with room still left reports `MaxLimit`.
pub(crate) fn limit_reason(
    current: u32,
    max_allowed: u32,
    stock_quantity: Option<u32>,
) -> LimitReason {
    match stock_quantity {
        Some(stock) if stock < GLOBAL_MAX_PER_PRODUCT => LimitReason::StockLimit,
        _ if current >= max_allowed => LimitReason::MaximumReached,
        _ => LimitReason::MaxLimit,
    }
}

/// One product or service entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Catalog identifier; unique within the cart.
    pub id: ProductId,
    pub name: String,
    /// Regular unit price at add-time.
    pub base_price: Money,
    /// Promotional unit price captured at add-time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_price: Option<Money>,
    /// Whether a promotion was active when the item was added.
    pub has_promotion: bool,
    pub quantity: u32,
    /// Stock at add-time; absent means unlimited for capping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    /// Cached cap: `min(GLOBAL_MAX_PER_PRODUCT, stock_quantity)`.
    pub max_allowed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

impl CartLineItem {
    /// Build a line item from a catalog record, caching price, promotion,
    /// and cap at add-time.
    pub fn from_record(record: &CatalogRecord, quantity: u32) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            base_price: record.price,
            promotion_price: record.promotion.map(|p| p.price),
            has_promotion: record.has_promotion(),
            quantity,
            stock_quantity: record.stock_quantity,
            max_allowed: max_allowed_for_stock(record.stock_quantity),
            product_code: record.product_code.clone(),
            unit: record.unit.clone().unwrap_or_else(|| "piece".to_string()),
            category: record.category.clone(),
            sub_category: record.sub_category.clone(),
        }
    }

    /// The unit price the buyer pays.
    pub fn effective_unit_price(&self) -> Money {
        match self.promotion_price {
            Some(price) if self.has_promotion => price,
            _ => self.base_price,
        }
    }

    /// Effective unit price x quantity.
    pub fn line_total(&self) -> Money {
        self.effective_unit_price() * self.quantity
    }

    /// Whether the line is at its cap.
    pub fn at_capacity(&self) -> bool {
        self.quantity >= self.max_allowed
    }
}
