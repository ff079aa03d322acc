//! Catalog product records.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product record as returned by the catalog endpoints.
///
/// This is the source of the denormalized snapshot captured into a
/// cart line at add-time; the cart never re-fetches live product
/// data (price-at-add-time is deliberate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Current unit price.
    pub price: Money,
    /// Image reference.
    pub image_url: String,
    /// Category label.
    pub category: String,
    /// Whether the product is featured on the home page.
    #[serde(default)]
    pub is_featured: bool,
}
