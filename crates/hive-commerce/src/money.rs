//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (paise for
/// INR, cents for USD/EUR). All arithmetic is checked; overflow and
/// currency mixing surface as `None` from the `try_*` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use hive_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::INR);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value for display math.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "₹49.99").
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to multiply by a scalar, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values with checked arithmetic.
    ///
    /// Returns `None` on currency mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4999, Currency::INR);
        assert_eq!(m.amount_cents, 4999);
        assert_eq!(m.currency, Currency::INR);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::INR);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::INR);
        assert_eq!(m.display(), "\u{20b9}49.99");
    }

    #[test]
    fn test_try_add() {
        let a = Money::new(1000, Currency::INR);
        let b = Money::new(500, Currency::INR);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1500);
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let inr = Money::new(1000, Currency::INR);
        let usd = Money::new(1000, Currency::USD);
        assert!(inr.try_add(&usd).is_none());
    }

    #[test]
    fn test_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::INR);
        assert!(m.try_multiply(2).is_none());
    }

    #[test]
    fn test_try_sum() {
        let values = vec![
            Money::new(100, Currency::INR),
            Money::new(250, Currency::INR),
        ];
        let sum = Money::try_sum(values.iter(), Currency::INR).unwrap();
        assert_eq!(sum.amount_cents, 350);
    }
}
