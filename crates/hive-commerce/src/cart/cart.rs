//! Cart and cart line types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product's presence in the cart.
///
/// Everything except `quantity` is a denormalized snapshot of the
/// product captured at add-time. It is never refreshed from the
/// catalog: the customer pays the price they saw when they added the
/// item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product identifier; the natural key within the cart.
    pub product_id: ProductId,
    /// Product name at add-time.
    pub name: String,
    /// Product description at add-time.
    pub description: String,
    /// Unit price at add-time.
    pub unit_price: Money,
    /// Image reference at add-time.
    pub image_url: String,
    /// Category label at add-time.
    pub category: String,
    /// Quantity, always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Snapshot a product into a new line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            quantity: 1,
        }
    }

    /// Line subtotal (unit price times quantity), checked.
    pub fn subtotal(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// An ordered sequence of cart lines; insertion order is display
/// order.
///
/// Serializes transparently as a JSON array of lines, which is the
/// persisted layout under the `cart` storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Cart {
    /// Lines in insertion order, at most one per product.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count: the sum of quantities over all lines.
    ///
    /// This is the badge figure, not the number of lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Add a product snapshot: merge into an existing line by
    /// incrementing its quantity, or append a new line with
    /// quantity 1. Never duplicates a product.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::from_product(product));
        }
    }

    /// Set the quantity of a product's line.
    ///
    /// Quantities below 1 are rejected (returns `false`, nothing
    /// changes): reduction to zero goes through [`Cart::remove`].
    /// Returns `true` if a line was updated.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity < 1 {
            return false;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            line.quantity = quantity;
            true
        } else {
            false
        }
    }

    /// Remove a product's line. Returns `true` if a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() < before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: "test".to_string(),
            price: Money::new(price_cents, Currency::INR),
            image_url: "/assets/test.png".to_string(),
            category: "honey".to_string(),
            is_featured: false,
        }
    }

    #[test]
    fn test_add_new_product() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1000));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.line(&ProductId::new("p1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_merges_never_duplicates() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1000));
        cart.add(&product("p1", 1000));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1000));

        // Price changed in the catalog; the line keeps the price the
        // customer saw at add-time.
        let mut repriced = product("p1", 2000);
        repriced.name = "Renamed".to_string();
        cart.add(&repriced);

        let line = cart.line(&ProductId::new("p1")).unwrap();
        assert_eq!(line.unit_price.amount_cents, 1000);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_set_quantity_floor() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1000));

        assert!(!cart.set_quantity(&ProductId::new("p1"), 0));
        assert!(!cart.set_quantity(&ProductId::new("p1"), -1));
        assert_eq!(cart.line(&ProductId::new("p1")).unwrap().quantity, 1);

        assert!(cart.set_quantity(&ProductId::new("p1"), 4));
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_remove_absent_product() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1000));

        assert!(!cart.remove(&ProductId::new("p2")));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 100));
        cart.add(&product("p2", 200));
        cart.add(&product("p3", 300));
        cart.remove(&ProductId::new("p2"));

        let ids: Vec<&str> = cart.lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1000));

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
