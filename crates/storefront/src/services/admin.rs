//! Admin management surface.
//!
//! Every operation is gated on the acting session holding the admin role.
//! The gate lives in the data layer so no rendering layer can bypass it;
//! the operations themselves are thin delegations to the repositories.

use foodipy_core::{Email, OrderId, OrderStatus, ProductId, Role, UserId};

use super::auth::{hash_password, validate_password};
use crate::db::{OrderRepository, ProductRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::models::order::Order;
use crate::models::product::{NewProduct, Product, ProductPatch};
use crate::models::session::SessionUser;
use crate::models::user::{NewUser, User, UserPatch};
use crate::store::Store;

/// Input for admin-initiated account creation.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Requested role; the directory still forces admin for the reserved
    /// address.
    pub role: Role,
}

/// Admin-initiated account update. `None` leaves the stored value
/// untouched; unlike self-service profile updates, the role can change.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
}

/// Authorization-gated management operations.
pub struct AdminService {
    store: Store,
}

impl AdminService {
    /// Create a new admin service.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    // =========================================================================
    // Catalog management
    // =========================================================================

    /// Add a listing to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin.
    pub fn create_product(&self, acting: &SessionUser, new: NewProduct) -> Result<Product> {
        self.authorize(acting)?;
        Ok(ProductRepository::new(&self.store).create(new)?)
    }

    /// Apply a partial update to a listing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin, or
    /// `AppError::Repository` with `NotFound` for an unknown id.
    pub fn update_product(
        &self,
        acting: &SessionUser,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product> {
        self.authorize(acting)?;
        Ok(ProductRepository::new(&self.store).update(id, patch)?)
    }

    /// Remove a listing from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin.
    pub fn delete_product(&self, acting: &SessionUser, id: ProductId) -> Result<()> {
        self.authorize(acting)?;
        Ok(ProductRepository::new(&self.store).delete(id)?)
    }

    // =========================================================================
    // Account management
    // =========================================================================

    /// All directory records, password hashes intact. Whether the hashes
    /// are shown is the admin UI's reveal toggle, not a data-layer filter.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin.
    pub fn list_users(&self, acting: &SessionUser) -> Result<Vec<User>> {
        self.authorize(acting)?;
        Ok(UserRepository::new(&self.store).list()?)
    }

    /// Create an account on someone's behalf.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin,
    /// `AppError::Auth` for rejected input, or `AppError::Repository` with
    /// `DuplicateEmail` for a taken address.
    pub fn create_user(&self, acting: &SessionUser, request: CreateUser) -> Result<User> {
        self.authorize(acting)?;

        if request.name.trim().is_empty() {
            return Err(AppError::Auth(super::auth::AuthError::MissingField {
                field: "name",
            }));
        }
        let email = Email::parse(&request.email).map_err(super::auth::AuthError::from)?;
        validate_password(&request.password)?;
        let password_hash = hash_password(&request.password)?;

        Ok(UserRepository::new(&self.store).create(NewUser {
            name: request.name,
            email,
            password_hash,
            phone: request.phone,
            address: request.address,
            role: request.role,
        })?)
    }

    /// Apply a partial update to an account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin,
    /// `AppError::Auth` for rejected input, or `AppError::Repository` with
    /// `NotFound`/`DuplicateEmail` from the directory.
    pub fn update_user(&self, acting: &SessionUser, id: UserId, update: UserUpdate) -> Result<User> {
        self.authorize(acting)?;

        let mut patch = UserPatch {
            name: update.name,
            phone: update.phone,
            address: update.address,
            role: update.role,
            ..UserPatch::default()
        };
        if let Some(email) = update.email {
            patch.email = Some(Email::parse(&email).map_err(super::auth::AuthError::from)?);
        }
        if let Some(password) = update.password {
            validate_password(&password)?;
            patch.password_hash = Some(hash_password(&password)?);
        }

        Ok(UserRepository::new(&self.store).update(id, patch)?)
    }

    /// Remove an account. Idempotent; the user's orders stay in the
    /// ledger.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin.
    pub fn delete_user(&self, acting: &SessionUser, id: UserId) -> Result<()> {
        self.authorize(acting)?;
        Ok(UserRepository::new(&self.store).delete(id)?)
    }

    // =========================================================================
    // Order management
    // =========================================================================

    /// Every order in the ledger, across all users.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin.
    pub fn list_orders(&self, acting: &SessionUser) -> Result<Vec<Order>> {
        self.authorize(acting)?;
        Ok(OrderRepository::new(&self.store).list(None)?)
    }

    /// Set an order's status; any status may replace any other.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` unless `acting` is an admin, or
    /// `AppError::Repository` with `NotFound` for an unknown id.
    pub fn update_order_status(
        &self,
        acting: &SessionUser,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order> {
        self.authorize(acting)?;
        Ok(OrderRepository::new(&self.store).update_status(id, status)?)
    }

    fn authorize(&self, acting: &SessionUser) -> Result<()> {
        if acting.is_admin() {
            Ok(())
        } else {
            tracing::warn!(user = %acting.id, "admin operation rejected");
            Err(AppError::Unauthorized("admin role required".to_owned()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use foodipy_core::{Category, Price};

    use super::*;
    use crate::db::RepositoryError;

    fn session(role: Role) -> SessionUser {
        SessionUser {
            id: UserId::generate(),
            name: "Acting User".to_owned(),
            email: Email::parse("acting@example.com").unwrap(),
            phone: None,
            address: None,
            role,
            created_at: Utc::now(),
        }
    }

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Veggie Pizza".to_owned(),
            description: "test listing".to_owned(),
            price: Price::from_cents(1199),
            image: "https://example.com/pizza.jpg".to_owned(),
            category: Category::Pizza,
            in_stock: true,
        }
    }

    #[test]
    fn test_non_admin_is_rejected_everywhere() {
        let admin = AdminService::new(Store::in_memory());
        let user = session(Role::User);

        assert!(matches!(
            admin.create_product(&user, new_product()),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            admin.list_users(&user),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            admin.list_orders(&user),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            admin.update_order_status(&user, OrderId::generate(), OrderStatus::Completed),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_admin_manages_catalog() {
        let store = Store::in_memory();
        let admin = AdminService::new(store.clone());
        let acting = session(Role::Admin);

        let product = admin.create_product(&acting, new_product()).unwrap();
        let updated = admin
            .update_product(
                &acting,
                product.id,
                ProductPatch {
                    in_stock: Some(false),
                    ..ProductPatch::default()
                },
            )
            .unwrap();
        assert!(!updated.in_stock);

        admin.delete_product(&acting, product.id).unwrap();
        assert_eq!(
            ProductRepository::new(&store)
                .find_by_id(product.id)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_admin_creates_user_with_requested_role() {
        let admin = AdminService::new(Store::in_memory());
        let acting = session(Role::Admin);

        let user = admin
            .create_user(
                &acting,
                CreateUser {
                    name: "New Admin".to_owned(),
                    email: "second@example.com".to_owned(),
                    password: "hunter2!".to_owned(),
                    phone: None,
                    address: None,
                    role: Role::Admin,
                },
            )
            .unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_admin_create_user_duplicate_email() {
        let admin = AdminService::new(Store::in_memory());
        let acting = session(Role::Admin);
        let request = CreateUser {
            name: "Someone".to_owned(),
            email: "dup@example.com".to_owned(),
            password: "hunter2!".to_owned(),
            phone: None,
            address: None,
            role: Role::User,
        };

        admin.create_user(&acting, request.clone()).unwrap();
        assert!(matches!(
            admin.create_user(&acting, request),
            Err(AppError::Repository(RepositoryError::DuplicateEmail))
        ));
    }

    #[test]
    fn test_admin_updates_role_and_password() {
        let store = Store::in_memory();
        let admin = AdminService::new(store);
        let acting = session(Role::Admin);

        let user = admin
            .create_user(
                &acting,
                CreateUser {
                    name: "Someone".to_owned(),
                    email: "someone@example.com".to_owned(),
                    password: "hunter2!".to_owned(),
                    phone: None,
                    address: None,
                    role: Role::User,
                },
            )
            .unwrap();

        let updated = admin
            .update_user(
                &acting,
                user.id,
                UserUpdate {
                    role: Some(Role::Admin),
                    password: Some("rotated pass".to_owned()),
                    ..UserUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert_ne!(updated.password_hash, user.password_hash);
    }

    #[test]
    fn test_admin_delete_user_is_idempotent() {
        let admin = AdminService::new(Store::in_memory());
        let acting = session(Role::Admin);

        let user = admin
            .create_user(
                &acting,
                CreateUser {
                    name: "Someone".to_owned(),
                    email: "someone@example.com".to_owned(),
                    password: "hunter2!".to_owned(),
                    phone: None,
                    address: None,
                    role: Role::User,
                },
            )
            .unwrap();

        admin.delete_user(&acting, user.id).unwrap();
        admin.delete_user(&acting, user.id).unwrap();
        assert!(admin.list_users(&acting).unwrap().is_empty());
    }
}
