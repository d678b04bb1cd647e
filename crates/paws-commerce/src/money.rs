//! Money type for AED amounts.
//!
//! Amounts are exact decimals (`rust_decimal`). Arithmetic never rounds;
//! rounding to two decimal places happens only when an amount is formatted
//! for display or converted to fils for the payment processor.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// An AED amount.
///
/// The storefront trades in a single currency, so `Money` carries no
/// currency tag; conversions to the processor's minor unit (fils) are
/// explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// ISO currency code for all amounts.
    pub const CURRENCY: &'static str = "AED";

    /// Create from an exact decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create from a whole number of dirhams.
    pub fn from_major(dirhams: i64) -> Self {
        Self(Decimal::from(dirhams))
    }

    /// Create from fils (1/100 AED), the processor's minor unit.
    pub fn from_fils(fils: i64) -> Self {
        Self(Decimal::new(fils, 2))
    }

    /// Zero dirhams.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The exact inner amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Convert to fils, rounding to the nearest fil.
    ///
    /// The payment processor takes amounts in the smallest currency unit.
    pub fn to_fils(&self) -> i64 {
        (self.0 * Decimal::from(100)).round().to_i64().unwrap_or(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if this is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Format as a display string (e.g., "AED 49.99").
    pub fn display(&self) -> String {
        format!("{} {}", Self::CURRENCY, self.display_amount())
    }

    /// Format the amount without the currency code (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let mut rounded = self.0.round_dp(2);
        rounded.rescale(2);
        rounded.to_string()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money(self.0 * Decimal::from(quantity))
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, factor: Decimal) -> Money {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serialize a `Money` as a JSON number.
///
/// The backend order API takes plain decimal numbers; the default `Money`
/// serialization (a string) is kept for stored state where exact
/// round-trips matter. Use with `#[serde(with = "money::float")]`.
pub mod float {
    use super::Money;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&money.0, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money)
    }
}

/// `Option<Money>` variant of [`float`].
pub mod float_option {
    use super::Money;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        money: &Option<Money>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let amount = money.map(|m| m.0);
        rust_decimal::serde::float_option::serialize(&amount, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Money>, D::Error> {
        rust_decimal::serde::float_option::deserialize(deserializer)
            .map(|amount| amount.map(Money))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        let m = Money::from_fils(4999);
        assert_eq!(m.display(), "AED 49.99");

        let m = Money::from_major(210);
        assert_eq!(m.display(), "AED 210.00");
    }

    #[test]
    fn test_money_to_fils() {
        assert_eq!(Money::from_major(100).to_fils(), 10000);
        assert_eq!(Money::from_fils(4999).to_fils(), 4999);
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_fils(50);
        assert_eq!((a + b).display(), "AED 10.50");
        assert_eq!((a - b).display(), "AED 9.50");
        assert_eq!((b * 3).to_fils(), 150);
    }

    #[test]
    fn test_vat_multiplication_is_exact() {
        // 5% of 240 must be exactly 12, not 11.999...
        let subtotal = Money::from_major(240);
        let vat = subtotal * Decimal::new(5, 2);
        assert_eq!(vat, Money::from_major(12));
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [Money::from_major(1), Money::from_major(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_major(3));
    }

    #[test]
    fn test_serde_roundtrip_is_exact() {
        let m = Money::from_fils(12345);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn test_deserialize_from_number() {
        // Catalog responses carry prices as JSON numbers.
        let m: Money = serde_json::from_str("49.99").unwrap();
        assert_eq!(m.display_amount(), "49.99");
    }
}
