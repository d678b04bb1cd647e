//! Catalog record types.
//!
//! The catalog is owned by the backend; the cart only consumes these
//! read-only shapes when an item is added. Whether a promotion is
//! currently active is resolved by the catalog, not re-evaluated here.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Money;

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// A physical product.
    #[default]
    Product,
    /// A grooming service.
    Service,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Product => "product",
            CatalogKind::Service => "service",
        }
    }
}

/// An active promotion on a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Reduced unit price while the promotion runs.
    pub price: Money,
}

/// A product or service as served by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// Stable catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Regular unit price.
    pub price: Money,
    /// Promotion, present only while currently active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
    /// Units available; absent means unlimited for capping purposes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    /// Merchant product/service code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    /// Sale unit (defaults to "piece" when added to the cart).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub kind: CatalogKind,
}

impl CatalogRecord {
    /// Whether a promotion is currently active.
    pub fn has_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// The price a buyer pays right now.
    pub fn effective_price(&self) -> Money {
        self.promotion.map(|p| p.price).unwrap_or(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_prefers_promotion() {
        let record = CatalogRecord {
            id: ProductId::new("p2"),
            name: "Chew Toy".into(),
            price: Money::from_major(50),
            promotion: Some(Promotion {
                price: Money::from_major(40),
            }),
            stock_quantity: None,
            product_code: None,
            unit: None,
            category: None,
            sub_category: None,
            kind: CatalogKind::Product,
        };
        assert_eq!(record.effective_price(), Money::from_major(40));
        assert!(record.has_promotion());
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "id": "p1",
            "name": "Dog Shampoo",
            "price": 100,
            "stockQuantity": 3,
            "productCode": "SH-01",
            "category": "grooming"
        }"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.stock_quantity, Some(3));
        assert_eq!(record.effective_price(), Money::from_major(100));
        assert_eq!(record.kind, CatalogKind::Product);
    }
}
