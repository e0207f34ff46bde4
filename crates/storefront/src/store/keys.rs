//! Storage keys for each persisted collection.
//!
//! One key per entity collection plus one for the session record. The
//! names are part of the on-disk format; renaming one orphans existing
//! data.

/// The user directory (`Vec<User>`).
pub const USERS: &str = "foodipy_users";

/// The current session (`SessionUser`), absent when anonymous.
pub const SESSION: &str = "foodipy_user";

/// The product catalog (`Vec<Product>`).
pub const PRODUCTS: &str = "foodipy_products";

/// The order ledger (`Vec<Order>`).
pub const ORDERS: &str = "foodipy_orders";
