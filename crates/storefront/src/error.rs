//! Unified application error.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::store::StorageError;

/// Application-level error aggregating the data-layer error kinds.
///
/// Business-rule violations are ordinary values of this type, returned -
/// never thrown - to the embedding UI, which is responsible for surfacing
/// a user-visible message. There is no centralized catch beyond this.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout operation failed.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Operation requires a role the acting session does not hold.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Unauthorized("admin role required".to_owned());
        assert_eq!(err.to_string(), "unauthorized: admin role required");

        let err = AppError::Repository(RepositoryError::DuplicateEmail);
        assert_eq!(err.to_string(), "repository error: email already exists");
    }
}
