//! Pricing derivation: subtotal, shipping, tax, total.
//!
//! A pure function of cart contents. Nothing here is persisted or
//! cached; every surface recomputes on read.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Orders strictly above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 500_00;

/// Flat shipping charge below the free-shipping threshold.
pub const FLAT_SHIPPING_CENTS: i64 = 50_00;

/// Tax rate applied to the subtotal, in percent.
pub const TAX_RATE_PERCENT: i64 = 18;

/// Derived pricing figures for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricingBreakdown {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Money,
    /// Flat charge, or zero above the free-shipping threshold.
    pub shipping: Money,
    /// Tax on the subtotal, rounded to the cent.
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
}

/// Compute the pricing breakdown for a cart.
///
/// Total over any well-formed cart, including the empty one (which
/// prices at subtotal 0, flat shipping, tax 0). The only error paths
/// are arithmetic overflow and mixed-currency lines.
pub fn compute_breakdown(cart: &Cart) -> Result<PricingBreakdown, CommerceError> {
    let currency = cart
        .lines
        .first()
        .map(|l| l.unit_price.currency)
        .unwrap_or_default();

    let mut subtotal = Money::zero(currency);
    for line in &cart.lines {
        if line.unit_price.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: line.unit_price.currency.code().to_string(),
            });
        }
        let line_total = line.subtotal().ok_or(CommerceError::Overflow)?;
        subtotal = subtotal.try_add(&line_total).ok_or(CommerceError::Overflow)?;
    }

    let shipping = if subtotal.amount_cents > FREE_SHIPPING_THRESHOLD_CENTS {
        Money::zero(currency)
    } else {
        Money::new(FLAT_SHIPPING_CENTS, currency)
    };

    let tax = Money::new(tax_cents(subtotal.amount_cents)?, currency);

    let total = subtotal
        .try_add(&shipping)
        .and_then(|t| t.try_add(&tax))
        .ok_or(CommerceError::Overflow)?;

    Ok(PricingBreakdown {
        subtotal,
        shipping,
        tax,
        total,
    })
}

/// Tax on a subtotal, in cents, rounded arithmetically (half-up).
///
/// Integer form of `round(subtotal * 18%)` to two decimal places;
/// rounding applies to the tax figure only, never to the subtotal
/// or the shipping charge.
fn tax_cents(subtotal_cents: i64) -> Result<i64, CommerceError> {
    let scaled = subtotal_cents
        .checked_mul(TAX_RATE_PERCENT)
        .and_then(|s| s.checked_add(50))
        .ok_or(CommerceError::Overflow)?;
    Ok(scaled / 100)
}

/// Convenience: does this subtotal qualify for free shipping?
pub fn qualifies_for_free_shipping(subtotal: &Money) -> bool {
    subtotal.amount_cents > FREE_SHIPPING_THRESHOLD_CENTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::ids::ProductId;

    fn cart_with_subtotal(cents: i64) -> Cart {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: ProductId::new("p1"),
            name: "Product".to_string(),
            description: "test".to_string(),
            price: Money::new(cents, Currency::INR),
            image_url: String::new(),
            category: "honey".to_string(),
            is_featured: false,
        });
        cart
    }

    #[test]
    fn test_subtotal_600_ships_free() {
        let breakdown = compute_breakdown(&cart_with_subtotal(600_00)).unwrap();
        assert_eq!(breakdown.subtotal.amount_cents, 600_00);
        assert_eq!(breakdown.shipping.amount_cents, 0);
        assert_eq!(breakdown.tax.amount_cents, 108_00);
        assert_eq!(breakdown.total.amount_cents, 708_00);
    }

    #[test]
    fn test_subtotal_100_pays_flat_shipping() {
        let breakdown = compute_breakdown(&cart_with_subtotal(100_00)).unwrap();
        assert_eq!(breakdown.shipping.amount_cents, 50_00);
        assert_eq!(breakdown.tax.amount_cents, 18_00);
        assert_eq!(breakdown.total.amount_cents, 168_00);
    }

    #[test]
    fn test_empty_cart_totals_flat_shipping() {
        let breakdown = compute_breakdown(&Cart::new()).unwrap();
        assert_eq!(breakdown.subtotal.amount_cents, 0);
        assert_eq!(breakdown.shipping.amount_cents, 50_00);
        assert_eq!(breakdown.tax.amount_cents, 0);
        assert_eq!(breakdown.total.amount_cents, 50_00);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly 500.00 still pays shipping; 500.01 does not.
        let at = compute_breakdown(&cart_with_subtotal(500_00)).unwrap();
        assert_eq!(at.shipping.amount_cents, 50_00);

        let above = compute_breakdown(&cart_with_subtotal(500_01)).unwrap();
        assert_eq!(above.shipping.amount_cents, 0);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 0.03 * 18% = 0.0054 -> 0.01
        assert_eq!(tax_cents(3).unwrap(), 1);
        // 0.02 * 18% = 0.0036 -> 0.00 (0.36 cents rounds down)
        assert_eq!(tax_cents(2).unwrap(), 0);
        // 25.00 * 18% = 4.50 exactly
        assert_eq!(tax_cents(25_00).unwrap(), 4_50);
    }

    #[test]
    fn test_multi_line_subtotal() {
        let mut cart = cart_with_subtotal(100_00);
        cart.add(&Product {
            id: ProductId::new("p2"),
            name: "Other".to_string(),
            description: "test".to_string(),
            price: Money::new(75_50, Currency::INR),
            image_url: String::new(),
            category: "honey".to_string(),
            is_featured: false,
        });
        cart.set_quantity(&ProductId::new("p2"), 2);

        let breakdown = compute_breakdown(&cart).unwrap();
        assert_eq!(breakdown.subtotal.amount_cents, 100_00 + 2 * 75_50);
    }

    #[test]
    fn test_mixed_currencies_rejected() {
        let mut cart = cart_with_subtotal(100_00);
        cart.add(&Product {
            id: ProductId::new("p2"),
            name: "Import".to_string(),
            description: "test".to_string(),
            price: Money::new(100, Currency::USD),
            image_url: String::new(),
            category: "honey".to_string(),
            is_featured: false,
        });

        assert!(matches!(
            compute_breakdown(&cart),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let cart = cart_with_subtotal(333_33);
        let a = compute_breakdown(&cart).unwrap();
        let b = compute_breakdown(&cart).unwrap();
        assert_eq!(a, b);
    }
}
