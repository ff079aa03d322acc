//! Outbound order construction.

use crate::address::Address;
use hive_commerce::cart::Cart;
use hive_commerce::ids::ProductId;
use hive_commerce::money::Money;
use hive_commerce::pricing::PricingBreakdown;
use serde::{Deserialize, Serialize};

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,
    /// Pay online at submission.
    #[serde(rename = "razorpay")]
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cod",
            PaymentMethod::Online => "razorpay",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Online => "Online Payment",
        }
    }
}

/// One order line: the cart line stripped to what the backend needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product identifier.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price at add-time.
    pub price: Money,
}

/// The order submission payload.
///
/// Outbound only: the engine never receives a typed order back, just
/// a success or failure signal. The same address is used for both
/// shipping and billing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    /// Line items from click-time cart contents.
    pub items: Vec<OrderItem>,
    /// Shipping address.
    pub shipping_address: Address,
    /// Billing address (same as shipping).
    pub billing_address: Address,
    /// Shipping charge from the pricing breakdown.
    pub shipping_cost: Money,
    /// Tax from the pricing breakdown.
    pub tax: Money,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
}

impl OrderRequest {
    /// Build the payload from the cart as it stands right now, the
    /// resolved address, and the derived pricing figures.
    pub fn build(
        cart: &Cart,
        address: Address,
        pricing: &PricingBreakdown,
        payment_method: PaymentMethod,
    ) -> Self {
        let items = cart
            .lines
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                price: line.unit_price,
            })
            .collect();

        Self {
            items,
            shipping_address: address.clone(),
            billing_address: address,
            shipping_cost: pricing.shipping,
            tax: pricing.tax,
            payment_method,
        }
    }
}
