//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] foodipy_core::EmailError),

    /// Email/password pair did not match a directory record.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered.
    #[error("email already exists")]
    EmailTaken,

    /// Password too short.
    #[error("password must be at least {min} characters")]
    WeakPassword {
        /// Minimum accepted length.
        min: usize,
    },

    /// A required field was empty.
    #[error("{field} is required")]
    MissingField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Directory/storage failure.
    #[error("directory error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failure.
    #[error("password hashing error")]
    PasswordHash,
}
