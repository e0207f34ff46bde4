//! Order ledger records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodipy_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus, Price, UserId};

use super::product::CartItem;

/// An order: an immutable snapshot of a cart at checkout time.
///
/// `status` is the only field mutated after creation, and only through the
/// admin surface. Orders are never deleted - removing the user who placed
/// one leaves it in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    /// Pre-tax, pre-delivery subtotal. Display surcharges are never
    /// persisted.
    pub total: Price,
    pub status: OrderStatus,
    pub payment: PaymentInfo,
    pub created_at: DateTime<Utc>,
}

/// Outcome of the simulated payment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
