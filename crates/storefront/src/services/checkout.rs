//! Checkout: turning a cart snapshot into a ledger entry.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

use foodipy_core::{PaymentMethod, PaymentStatus, UserId};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::order::{Order, PaymentInfo};
use crate::models::product::CartItem;
use crate::store::Store;

/// Fixed simulated processing latency for non-cash payments.
const PAYMENT_PROCESSING_DELAY: Duration = Duration::from_millis(1500);

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was invoked with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Ledger/storage failure.
    #[error("ledger error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout service.
pub struct CheckoutService {
    store: Store,
}

impl CheckoutService {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Place an order for `user` from a cart snapshot.
    ///
    /// Non-cash methods sit through a fixed simulated processing delay
    /// before the ledger write; the delay is not cancellable and always
    /// completes. The snapshot is recorded as-is - clearing the cart after
    /// a successful return is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty snapshot, or
    /// `CheckoutError::Repository` if the ledger write fails.
    pub async fn place_order(
        &self,
        items: Vec<CartItem>,
        user: UserId,
        method: PaymentMethod,
    ) -> Result<Order, CheckoutError> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let payment = simulate_payment(method);
        if method != PaymentMethod::Cod {
            tokio::time::sleep(PAYMENT_PROCESSING_DELAY).await;
        }

        let order = OrderRepository::new(&self.store).create(items, user, payment)?;
        Ok(order)
    }
}

/// Build the payment record for `method`.
///
/// Cash on delivery stays pending with no transaction id; the simulated
/// online methods settle immediately with a synthetic reference.
fn simulate_payment(method: PaymentMethod) -> PaymentInfo {
    let reference = Utc::now().timestamp_millis();
    match method {
        PaymentMethod::Cod => PaymentInfo {
            method,
            status: PaymentStatus::Pending,
            transaction_id: None,
            note: Some("Payment on delivery".to_owned()),
        },
        PaymentMethod::Upi => PaymentInfo {
            method,
            status: PaymentStatus::Completed,
            transaction_id: Some(format!("UPI{reference}")),
            note: Some("UPI payment processed".to_owned()),
        },
        PaymentMethod::Card => PaymentInfo {
            method,
            status: PaymentStatus::Completed,
            transaction_id: Some(format!("CARD{reference}")),
            note: Some("Card payment processed".to_owned()),
        },
    }
}
