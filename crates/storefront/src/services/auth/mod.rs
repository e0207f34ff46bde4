//! Session and authentication service.
//!
//! Owns the Anonymous -> Authenticated state machine. The authenticated
//! user is held in memory with the password hash stripped and mirrored to
//! the session storage key, so a restart re-hydrates the session.
//!
//! Passwords are stored as salted argon2 hashes and verified through the
//! hash; callers only ever observe the match/no-match outcome.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use foodipy_core::{Email, Role};

use crate::db::{RepositoryError, UserRepository};
use crate::models::session::SessionUser;
use crate::models::user::{NewUser, UserPatch};
use crate::store::{Store, keys};

/// Minimum password length for registration and password changes.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Input for self-registration.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Self-service profile update. `None` leaves the stored value untouched;
/// a `password` is validated and hashed before it reaches the directory.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Authentication and session service.
pub struct AuthService {
    store: Store,
    current: Option<SessionUser>,
}

impl AuthService {
    /// Create the service, re-hydrating any persisted session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the session record cannot be
    /// read from storage.
    pub fn new(store: Store) -> Result<Self, AuthError> {
        let current: Option<SessionUser> = store
            .read_record(keys::SESSION)
            .map_err(RepositoryError::Storage)?;
        if let Some(user) = &current {
            tracing::debug!(user = %user.id, "session re-hydrated");
        }

        Ok(Self { store, current })
    }

    /// Currently authenticated user, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    /// Whether the current session holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(SessionUser::is_admin)
    }

    /// Authenticate with an email/password pair.
    ///
    /// Unknown email, malformed email, and wrong password are
    /// indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the pair does not
    /// match a directory record.
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = UserRepository::new(&self.store)
            .find_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, &user.password_hash)?;

        let session = user.to_session();
        self.persist_session(&session)?;
        self.current = Some(session.clone());

        tracing::info!(user = %session.id, "logged in");
        Ok(session)
    }

    /// Register a new account and establish its session.
    ///
    /// The stored role is derived from the email: registering the reserved
    /// admin address yields an admin account, everything else a regular
    /// user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField`/`WeakPassword`/`InvalidEmail` for
    /// rejected input and `AuthError::EmailTaken` when the address is
    /// already registered.
    pub fn register(&mut self, request: RegisterRequest) -> Result<SessionUser, AuthError> {
        if request.name.trim().is_empty() {
            return Err(AuthError::MissingField { field: "name" });
        }
        let email = Email::parse(&request.email)?;
        validate_password(&request.password)?;
        let password_hash = hash_password(&request.password)?;

        let user = UserRepository::new(&self.store)
            .create(NewUser {
                name: request.name,
                email,
                password_hash,
                phone: request.phone,
                address: request.address,
                role: Role::User,
            })
            .map_err(|e| match e {
                RepositoryError::DuplicateEmail => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        let session = user.to_session();
        self.persist_session(&session)?;
        self.current = Some(session.clone());

        tracing::info!(user = %session.id, "registered");
        Ok(session)
    }

    /// Clear the session. The directory record is untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the session record cannot be
    /// removed from storage.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(user) = self.current.take() {
            tracing::info!(user = %user.id, "logged out");
        }
        self.store
            .remove(keys::SESSION)
            .map_err(RepositoryError::Storage)?;
        Ok(())
    }

    /// Merge a profile update into the directory record and refresh the
    /// session copy. A silent no-op when no session is active.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`/`WeakPassword` for rejected input
    /// and `AuthError::EmailTaken` when changing to a taken address.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), AuthError> {
        let Some(current) = &self.current else {
            return Ok(());
        };

        let mut patch = UserPatch {
            name: update.name,
            phone: update.phone,
            address: update.address,
            ..UserPatch::default()
        };
        if let Some(email) = update.email {
            patch.email = Some(Email::parse(&email)?);
        }
        if let Some(password) = update.password {
            validate_password(&password)?;
            patch.password_hash = Some(hash_password(&password)?);
        }

        match UserRepository::new(&self.store).update(current.id, patch) {
            Ok(updated) => {
                let session = updated.to_session();
                self.persist_session(&session)?;
                self.current = Some(session);
                Ok(())
            }
            Err(RepositoryError::DuplicateEmail) => Err(AuthError::EmailTaken),
            Err(RepositoryError::NotFound) => {
                // Session outlived its directory record (deleted by an
                // admin); nothing to merge into.
                tracing::warn!(user = %current.id, "profile update for missing directory record");
                Ok(())
            }
            Err(other) => Err(AuthError::Repository(other)),
        }
    }

    fn persist_session(&self, session: &SessionUser) -> Result<(), AuthError> {
        self.store
            .write_record(keys::SESSION, session)
            .map_err(RepositoryError::Storage)?;
        Ok(())
    }
}

/// Reject passwords below the minimum length.
pub(crate) fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Hash a password with a fresh random salt.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
