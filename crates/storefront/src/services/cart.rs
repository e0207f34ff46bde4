//! In-memory cart state.

use foodipy_core::{Price, ProductId};

use crate::models::product::{CartItem, Product};

/// The shopping cart: a transient collection of product snapshots with
/// quantities. Never persisted - a restart empties it.
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product`, merging with an existing line for the
    /// same product id.
    pub fn add(&mut self, product: Product) {
        if let Some(line) = self.items.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.items.push(CartItem {
                product,
                quantity: 1,
            });
        }
    }

    /// Drop the line for `id` entirely. Unknown ids are ignored.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|l| l.product.id != id);
    }

    /// Set the quantity for `id`, clamping anything below 1 up to 1 - a
    /// line never disappears through this path, only via [`Cart::remove`].
    /// Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if let Some(line) = self.items.iter_mut().find(|l| l.product.id == id) {
            line.quantity = quantity.max(1);
        }
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Sum of price x quantity across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Copy of the current lines, for checkout.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
