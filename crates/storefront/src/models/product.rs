//! Catalog records and cart lines.

use serde::{Deserialize, Serialize};

use foodipy_core::{Category, Price, ProductId};

/// A catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image URL or embedded data URI; never interpreted by the data layer.
    pub image: String,
    pub category: Category,
    pub in_stock: bool,
}

/// Input for creating a listing.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    pub in_stock: bool,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub category: Option<Category>,
    pub in_stock: Option<bool>,
}

/// A cart line: a product snapshot plus a quantity.
///
/// Orders persist these as-is, so catalog edits after checkout never
/// affect the items recorded on past orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Line total (price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}
