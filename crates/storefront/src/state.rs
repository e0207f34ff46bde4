//! Application state with explicit init and teardown.
//!
//! The session, cart, and catalog are not ambient globals: an embedding UI
//! constructs one [`App`] at startup, passes it where it is needed, and
//! drops it at shutdown (every mutation is persisted as it happens, so
//! teardown is just `Drop`).

use foodipy_core::{Email, PaymentMethod};

use crate::config::AppConfig;
use crate::db::users::RESERVED_ADMIN_EMAIL;
use crate::db::{OrderRepository, ProductRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::models::order::Order;
use crate::services::admin::AdminService;
use crate::services::auth::{self, AuthService};
use crate::services::cart::Cart;
use crate::services::checkout::CheckoutService;
use crate::store::Store;

/// The assembled application: storage plus the stateful services.
pub struct App {
    config: AppConfig,
    store: Store,
    auth: AuthService,
    cart: Cart,
    checkout: CheckoutService,
    admin: AdminService,
}

impl App {
    /// Bring the application up on the configured store file.
    ///
    /// Ensures the bootstrap admin exists, seeds the catalog on first run,
    /// and re-hydrates any persisted session, so every later operation
    /// finds the store in a usable state - in particular, the default
    /// admin credentials can always authenticate.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the store cannot be opened or the first-run
    /// writes fail.
    pub fn init(config: AppConfig) -> Result<Self> {
        let store = Store::open(config.store_path())?;
        Self::init_with_store(config, store)
    }

    /// As [`App::init`], over an explicit store (tests, ephemeral runs).
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the first-run writes fail.
    pub fn init_with_store(config: AppConfig, store: Store) -> Result<Self> {
        use secrecy::ExposeSecret;

        let admin_email =
            Email::parse(RESERVED_ADMIN_EMAIL).map_err(auth::AuthError::InvalidEmail)?;
        let password_hash = auth::hash_password(config.admin_password.expose_secret())?;
        UserRepository::new(&store).ensure_bootstrap_admin(&admin_email, &password_hash)?;
        ProductRepository::new(&store).list()?; // seeds the catalog on first run

        let auth = AuthService::new(store.clone())?;
        let checkout = CheckoutService::new(store.clone());
        let admin = AdminService::new(store.clone());

        tracing::info!("application state initialised");
        Ok(Self {
            config,
            store,
            auth,
            cart: Cart::new(),
            checkout,
            admin,
        })
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Session and authentication state.
    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Session and authentication state, for login/logout/profile calls.
    pub const fn auth_mut(&mut self) -> &mut AuthService {
        &mut self.auth
    }

    /// The in-memory cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The in-memory cart, for add/remove/quantity calls.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// The admin management surface.
    #[must_use]
    pub const fn admin(&self) -> &AdminService {
        &self.admin
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> ProductRepository<'_> {
        ProductRepository::new(&self.store)
    }

    /// The order ledger.
    #[must_use]
    pub const fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(&self.store)
    }

    /// Check out the current cart for the current session: snapshot the
    /// cart, run the (possibly simulated-latency) payment, append the
    /// order, then clear the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when anonymous and
    /// `AppError::Checkout` with `EmptyCart` for an empty cart; the cart
    /// is only cleared on success.
    pub async fn place_order(&mut self, method: PaymentMethod) -> Result<Order> {
        let user = self
            .auth
            .current()
            .ok_or_else(|| AppError::Unauthorized("login required to check out".to_owned()))?
            .id;

        let order = self
            .checkout
            .place_order(self.cart.snapshot(), user, method)
            .await?;
        self.cart.clear();
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodipy_core::Role;

    use super::*;
    use crate::services::auth::RegisterRequest;
    use crate::services::checkout::CheckoutError;

    fn ephemeral_app() -> App {
        App::init_with_store(AppConfig::with_data_dir("/unused"), Store::in_memory()).unwrap()
    }

    #[test]
    fn test_init_bootstraps_admin_and_catalog() {
        let mut app = ephemeral_app();

        assert_eq!(app.catalog().list().unwrap().len(), 9);
        assert!(app.auth().current().is_none());

        // The bootstrap admin can always authenticate.
        let session = app.auth_mut().login(RESERVED_ADMIN_EMAIL, "admin123").unwrap();
        assert_eq!(session.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_place_order_requires_session() {
        let mut app = ephemeral_app();
        let err = app.place_order(PaymentMethod::Cod).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_place_order_clears_cart_on_success() {
        let mut app = ephemeral_app();
        app.auth_mut()
            .register(RegisterRequest {
                name: "Customer".to_owned(),
                email: "customer@example.com".to_owned(),
                password: "hunter2!".to_owned(),
                phone: None,
                address: None,
            })
            .unwrap();

        let product = app.catalog().list().unwrap().into_iter().next().unwrap();
        app.cart_mut().add(product.clone());
        app.cart_mut().add(product);

        let order = app.place_order(PaymentMethod::Cod).await.unwrap();
        assert_eq!(order.items.first().unwrap().quantity, 2);
        assert!(app.cart().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_empty_cart_is_rejected() {
        let mut app = ephemeral_app();
        app.auth_mut()
            .register(RegisterRequest {
                name: "Customer".to_owned(),
                email: "customer@example.com".to_owned(),
                password: "hunter2!".to_owned(),
                phone: None,
                address: None,
            })
            .unwrap();

        let err = app.place_order(PaymentMethod::Cod).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Checkout(CheckoutError::EmptyCart)
        ));
    }
}
