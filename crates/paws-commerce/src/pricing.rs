//! Order total calculations.
//!
//! Pure functions shared by the cart's derived totals, the order payload
//! builder, and the buy-now path (a single item, no cart). Nothing here
//! touches storage or the UI.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartLineItem;
use crate::money::Money;

/// UAE VAT rate (5%), applied to the subtotal.
pub fn vat_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Pricing inputs for one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedItem {
    /// Regular unit price.
    pub unit_price: Money,
    /// Promotional unit price, when one was active at add-time.
    pub promotion_price: Option<Money>,
    /// Whether a promotion was active at add-time.
    pub has_promotion: bool,
    pub quantity: u32,
}

impl PricedItem {
    /// The unit price the buyer pays.
    pub fn effective_unit_price(&self) -> Money {
        match self.promotion_price {
            Some(price) if self.has_promotion => price,
            _ => self.unit_price,
        }
    }
}

impl From<&CartLineItem> for PricedItem {
    fn from(item: &CartLineItem) -> Self {
        Self {
            unit_price: item.base_price,
            promotion_price: item.promotion_price,
            has_promotion: item.has_promotion,
            quantity: item.quantity,
        }
    }
}

/// Complete totals breakdown for a set of lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTotals {
    /// Sum of effective unit price x quantity.
    pub subtotal: Money,
    /// Sum of regular unit price x quantity, ignoring promotions.
    pub original_total: Money,
    /// `original_total - subtotal`.
    pub savings: Money,
    /// VAT on the subtotal.
    pub vat_amount: Money,
    /// `subtotal + vat_amount`.
    pub total_amount: Money,
    /// Sum of quantities.
    pub item_count: u32,
}

impl OrderTotals {
    /// Calculate totals for a set of lines at the given VAT rate.
    pub fn calculate(items: &[PricedItem], vat_rate: Decimal) -> Self {
        let subtotal: Money = items
            .iter()
            .map(|i| i.effective_unit_price() * i.quantity)
            .sum();
        let original_total: Money = items.iter().map(|i| i.unit_price * i.quantity).sum();
        let vat_amount = subtotal * vat_rate;

        Self {
            subtotal,
            original_total,
            savings: original_total - subtotal,
            vat_amount,
            total_amount: subtotal + vat_amount,
            item_count: items.iter().map(|i| i.quantity).sum(),
        }
    }

    /// Totals for an empty set of lines.
    pub fn empty() -> Self {
        Self::calculate(&[], vat_rate())
    }

    /// Whether any promotion reduced the total.
    pub fn has_savings(&self) -> bool {
        self.savings.is_positive()
    }
}

/// One display line of an order summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummaryLine {
    pub name: String,
    pub product_code: Option<String>,
    pub quantity: u32,
    /// Effective unit price.
    pub unit_price: Money,
    /// Regular unit price.
    pub original_price: Money,
    /// Effective unit price x quantity.
    pub line_total: Money,
    pub has_promotion: bool,
}

/// Per-line breakdown plus totals, for confirmation screens and receipts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<OrderSummaryLine>,
    pub totals: OrderTotals,
}

/// Build a display summary for a set of cart lines.
pub fn order_summary(items: &[CartLineItem]) -> OrderSummary {
    let priced: Vec<PricedItem> = items.iter().map(PricedItem::from).collect();
    let lines = items
        .iter()
        .map(|item| OrderSummaryLine {
            name: item.name.clone(),
            product_code: item.product_code.clone(),
            quantity: item.quantity,
            unit_price: item.effective_unit_price(),
            original_price: item.base_price,
            line_total: item.line_total(),
            has_promotion: item.has_promotion,
        })
        .collect();

    OrderSummary {
        lines,
        totals: OrderTotals::calculate(&priced, vat_rate()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(price: i64, quantity: u32) -> PricedItem {
        PricedItem {
            unit_price: Money::from_major(price),
            promotion_price: None,
            has_promotion: false,
            quantity,
        }
    }

    #[test]
    fn test_single_item_totals() {
        // 2 x 100 => subtotal 200, VAT 10, total 210.
        let totals = OrderTotals::calculate(&[plain(100, 2)], vat_rate());
        assert_eq!(totals.subtotal, Money::from_major(200));
        assert_eq!(totals.vat_amount, Money::from_major(10));
        assert_eq!(totals.total_amount, Money::from_major(210));
        assert_eq!(totals.item_count, 2);
    }

    #[test]
    fn test_promotion_totals() {
        // 1 x (50 promoted to 40) + 2 x 100:
        // subtotal 240, original 250, savings 10, VAT 12, total 252.
        let promoted = PricedItem {
            unit_price: Money::from_major(50),
            promotion_price: Some(Money::from_major(40)),
            has_promotion: true,
            quantity: 1,
        };
        let totals = OrderTotals::calculate(&[promoted, plain(100, 2)], vat_rate());
        assert_eq!(totals.subtotal, Money::from_major(240));
        assert_eq!(totals.original_total, Money::from_major(250));
        assert_eq!(totals.savings, Money::from_major(10));
        assert_eq!(totals.vat_amount, Money::from_major(12));
        assert_eq!(totals.total_amount, Money::from_major(252));
        assert_eq!(totals.item_count, 3);
        assert!(totals.has_savings());
    }

    #[test]
    fn test_promotion_flag_without_price_falls_back() {
        let item = PricedItem {
            unit_price: Money::from_major(30),
            promotion_price: None,
            has_promotion: true,
            quantity: 1,
        };
        assert_eq!(item.effective_unit_price(), Money::from_major(30));
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let totals = OrderTotals::empty();
        assert!(totals.subtotal.is_zero());
        assert!(totals.vat_amount.is_zero());
        assert!(totals.total_amount.is_zero());
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn test_totals_consistency() {
        // grand total always equals subtotal + VAT, and subtotal never
        // exceeds the original total.
        let items = [plain(19, 3), plain(7, 1)];
        let totals = OrderTotals::calculate(&items, vat_rate());
        assert_eq!(totals.total_amount, totals.subtotal + totals.vat_amount);
        assert!(totals.subtotal <= totals.original_total);
    }
}
