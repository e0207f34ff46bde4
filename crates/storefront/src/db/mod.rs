//! Repositories over the local store.
//!
//! Each collection lives under its own storage key (see
//! [`crate::store::keys`]); a repository reads the whole collection,
//! applies its mutation, and writes the collection back. All operations
//! are synchronous and run to completion inside one caller, so there is no
//! interleaving to guard against within a process.
//!
//! ## Collections
//!
//! - `users` - the user directory ([`UserRepository`])
//! - `products` - the catalog ([`ProductRepository`])
//! - `orders` - the append-only order ledger ([`OrderRepository`])

pub mod orders;
pub mod products;
pub mod users;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

use thiserror::Error;

use crate::store::StorageError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// Another record already owns the email address.
    #[error("email already exists")]
    DuplicateEmail,
}
