//! Order ledger.

use chrono::Utc;

use foodipy_core::{OrderId, OrderStatus, Price, UserId};

use super::RepositoryError;
use crate::models::order::{Order, PaymentInfo};
use crate::models::product::CartItem;
use crate::store::{Store, keys};

/// Append-only repository for the order ledger.
///
/// Orders are created once and never deleted; status is the only field
/// that changes afterwards.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Append a new order snapshotting `items`.
    ///
    /// The total is the pre-tax, pre-delivery subtotal of the snapshot;
    /// display surcharges are never persisted. Status always starts
    /// `Pending`, whatever the payment method. Rejecting an empty snapshot
    /// is the checkout service's contract, not enforced here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn create(
        &self,
        items: Vec<CartItem>,
        user_id: UserId,
        payment: PaymentInfo,
    ) -> Result<Order, RepositoryError> {
        let total: Price = items.iter().map(CartItem::line_total).sum();
        let order = Order {
            id: OrderId::generate(),
            user_id,
            total,
            status: OrderStatus::Pending,
            items,
            payment,
            created_at: Utc::now(),
        };

        let mut orders: Vec<Order> = self.store.read_collection(keys::ORDERS)?;
        orders.push(order.clone());
        self.store.write_collection(keys::ORDERS, &orders)?;

        tracing::info!(order = %order.id, total = %order.total, "order placed");
        Ok(order)
    }

    /// All orders, or one user's if `user` is given. An empty result is
    /// not an error, and orders survive the deletion of their user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    pub fn list(&self, user: Option<UserId>) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<Order> = self.store.read_collection(keys::ORDERS)?;
        Ok(match user {
            Some(id) => orders.into_iter().filter(|o| o.user_id == id).collect(),
            None => orders,
        })
    }

    /// Look up an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    pub fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.list(None)?.into_iter().find(|o| o.id == id))
    }

    /// Set an order's status. Any status may replace any other - there is
    /// no transition graph.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id is not in the ledger;
    /// the ledger is left unchanged.
    pub fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut orders: Vec<Order> = self.store.read_collection(keys::ORDERS)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(RepositoryError::NotFound)?;
        order.status = status;

        let updated = order.clone();
        self.store.write_collection(keys::ORDERS, &orders)?;

        tracing::debug!(order = %updated.id, status = %updated.status, "order status updated");
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodipy_core::{Category, PaymentMethod, PaymentStatus, ProductId};

    use super::*;
    use crate::models::product::Product;

    fn cart_item(cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product: Product {
                id: ProductId::generate(),
                name: "Test Dish".to_owned(),
                description: "test".to_owned(),
                price: Price::from_cents(cents),
                image: "https://example.com/dish.jpg".to_owned(),
                category: Category::Pasta,
                in_stock: true,
            },
            quantity,
        }
    }

    fn cod_payment() -> PaymentInfo {
        PaymentInfo {
            method: PaymentMethod::Cod,
            status: PaymentStatus::Pending,
            transaction_id: None,
            note: Some("Payment on delivery".to_owned()),
        }
    }

    #[test]
    fn test_create_computes_subtotal_and_starts_pending() {
        let store = Store::in_memory();
        let repo = OrderRepository::new(&store);

        let items = vec![cart_item(1000, 2), cart_item(500, 1)];
        let order = repo
            .create(items.clone(), UserId::generate(), cod_payment())
            .unwrap();

        assert_eq!(order.total, Price::from_cents(2500));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items, items);
        assert!(!order.id.to_string().is_empty());
    }

    #[test]
    fn test_list_filters_by_user() {
        let store = Store::in_memory();
        let repo = OrderRepository::new(&store);
        let alice = UserId::generate();
        let bob = UserId::generate();

        repo.create(vec![cart_item(1000, 1)], alice, cod_payment())
            .unwrap();
        repo.create(vec![cart_item(500, 1)], bob, cod_payment())
            .unwrap();
        repo.create(vec![cart_item(700, 2)], alice, cod_payment())
            .unwrap();

        assert_eq!(repo.list(None).unwrap().len(), 3);
        assert_eq!(repo.list(Some(alice)).unwrap().len(), 2);
        assert!(repo.list(Some(UserId::generate())).unwrap().is_empty());
    }

    #[test]
    fn test_update_status_is_unrestricted() {
        let store = Store::in_memory();
        let repo = OrderRepository::new(&store);
        let order = repo
            .create(vec![cart_item(1000, 1)], UserId::generate(), cod_payment())
            .unwrap();

        // No transition graph: completed may go straight back to pending.
        let completed = repo
            .update_status(order.id, OrderStatus::Completed)
            .unwrap();
        assert_eq!(completed.status, OrderStatus::Completed);

        let reverted = repo.update_status(order.id, OrderStatus::Pending).unwrap();
        assert_eq!(reverted.status, OrderStatus::Pending);
    }

    #[test]
    fn test_update_status_unknown_id_leaves_ledger_unchanged() {
        let store = Store::in_memory();
        let repo = OrderRepository::new(&store);
        let order = repo
            .create(vec![cart_item(1000, 1)], UserId::generate(), cod_payment())
            .unwrap();

        let err = repo
            .update_status(OrderId::generate(), OrderStatus::Cancelled)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert_eq!(repo.list(None).unwrap(), vec![order]);
    }
}
