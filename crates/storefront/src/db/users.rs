//! User directory.
//!
//! Enforces the two invariants the rest of the application leans on:
//! emails are unique across the directory, and the reserved admin address
//! always maps to the admin role.

use chrono::Utc;

use foodipy_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::user::{NewUser, User, UserPatch};
use crate::store::{Store, keys};

/// The reserved administrator address. Any account created with this email
/// or updated to it is forced to the admin role.
pub const RESERVED_ADMIN_EMAIL: &str = "admin@foodipy.com";

/// Display name given to the synthesized bootstrap admin.
const BOOTSTRAP_ADMIN_NAME: &str = "Admin User";

/// Repository for user directory operations.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All directory records, password hashes intact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    pub fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.store.read_collection(keys::USERS)?)
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    pub fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|u| u.id == id))
    }

    /// Look up a record by email (exact comparison).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    pub fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|u| u.email == *email))
    }

    /// Create a directory record.
    ///
    /// The requested role is overridden to admin when the email is the
    /// reserved address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateEmail` if the email is already
    /// taken; the directory is left unchanged.
    pub fn create(&self, new: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.list()?;
        if users.iter().any(|u| u.email == new.email) {
            return Err(RepositoryError::DuplicateEmail);
        }

        let user = User {
            id: UserId::generate(),
            name: new.name,
            role: derive_role(&new.email, new.role),
            email: new.email,
            password_hash: new.password_hash,
            phone: new.phone,
            address: new.address,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        self.store.write_collection(keys::USERS, &users)?;

        tracing::debug!(user = %user.id, role = %user.role, "created directory record");
        Ok(user)
    }

    /// Apply a partial update to a record.
    ///
    /// Fields left `None` keep their stored value. After the merge the role
    /// is re-derived from the resulting email, so moving an account onto
    /// the reserved address promotes it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id is absent, or
    /// `RepositoryError::DuplicateEmail` if the patch changes the email to
    /// one owned by a different record.
    pub fn update(&self, id: UserId, patch: UserPatch) -> Result<User, RepositoryError> {
        let mut users = self.list()?;
        if !users.iter().any(|u| u.id == id) {
            return Err(RepositoryError::NotFound);
        }

        if let Some(new_email) = &patch.email
            && users.iter().any(|u| u.email == *new_email && u.id != id)
        {
            return Err(RepositoryError::DuplicateEmail);
        }

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Err(RepositoryError::NotFound);
        };

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(phone) = patch.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = patch.address {
            user.address = Some(address);
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        user.role = derive_role(&user.email, user.role);

        let updated = user.clone();
        self.store.write_collection(keys::USERS, &users)?;

        tracing::debug!(user = %updated.id, "updated directory record");
        Ok(updated)
    }

    /// Remove a record. Deleting an unknown id is a no-op, and the user's
    /// orders stay in the ledger.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let mut users = self.list()?;
        users.retain(|u| u.id != id);
        self.store.write_collection(keys::USERS, &users)?;
        Ok(())
    }

    /// Make sure the bootstrap admin exists, so the default credentials
    /// can always authenticate on a fresh (or wiped) store. Runs during
    /// application init, before any login can be attempted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn ensure_bootstrap_admin(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let mut users = self.list()?;
        if users.iter().any(|u| u.email == *email) {
            return Ok(());
        }

        users.push(User {
            id: UserId::generate(),
            name: BOOTSTRAP_ADMIN_NAME.to_owned(),
            email: email.clone(),
            password_hash: password_hash.to_owned(),
            phone: None,
            address: None,
            role: Role::Admin,
            created_at: Utc::now(),
        });
        self.store.write_collection(keys::USERS, &users)?;

        tracing::info!(email = %email, "bootstrap admin created");
        Ok(())
    }
}

/// Role actually stored for an account with `email`.
fn derive_role(email: &Email, requested: Role) -> Role {
    if email.as_str() == RESERVED_ADMIN_EMAIL {
        Role::Admin
    } else {
        requested
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Test User".to_owned(),
            email: Email::parse(email).unwrap(),
            password_hash: "$fake$hash".to_owned(),
            phone: None,
            address: None,
            role,
        }
    }

    #[test]
    fn test_create_assigns_id_and_timestamp() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);

        let user = repo.create(new_user("a@example.com", Role::User)).unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(repo.list().unwrap(), vec![user]);
    }

    #[test]
    fn test_create_duplicate_email_leaves_directory_unchanged() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);

        repo.create(new_user("a@example.com", Role::User)).unwrap();
        let before = repo.list().unwrap();

        let err = repo
            .create(new_user("a@example.com", Role::User))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateEmail));
        assert_eq!(repo.list().unwrap(), before);
    }

    #[test]
    fn test_reserved_email_forces_admin_role() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);

        let user = repo
            .create(new_user(RESERVED_ADMIN_EMAIL, Role::User))
            .unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_non_reserved_email_keeps_requested_role() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);

        let user = repo.create(new_user("b@example.com", Role::Admin)).unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);
        let user = repo.create(new_user("a@example.com", Role::User)).unwrap();

        let updated = repo
            .update(
                user.id,
                UserPatch {
                    name: Some("Renamed".to_owned()),
                    phone: Some("555-0100".to_owned()),
                    ..UserPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.password_hash, user.password_hash);
        assert_eq!(updated.created_at, user.created_at);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);

        let err = repo
            .update(UserId::generate(), UserPatch::default())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn test_update_to_taken_email_is_rejected() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);
        repo.create(new_user("a@example.com", Role::User)).unwrap();
        let other = repo.create(new_user("b@example.com", Role::User)).unwrap();

        let err = repo
            .update(
                other.id,
                UserPatch {
                    email: Some(Email::parse("a@example.com").unwrap()),
                    ..UserPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateEmail));
    }

    #[test]
    fn test_update_to_own_email_is_allowed() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);
        let user = repo.create(new_user("a@example.com", Role::User)).unwrap();

        let updated = repo
            .update(
                user.id,
                UserPatch {
                    email: Some(user.email.clone()),
                    ..UserPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.email, user.email);
    }

    #[test]
    fn test_update_to_reserved_email_promotes() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);
        let user = repo.create(new_user("a@example.com", Role::User)).unwrap();

        let updated = repo
            .update(
                user.id,
                UserPatch {
                    email: Some(Email::parse(RESERVED_ADMIN_EMAIL).unwrap()),
                    ..UserPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.role, Role::Admin);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);
        let user = repo.create(new_user("a@example.com", Role::User)).unwrap();

        repo.delete(user.id).unwrap();
        assert!(repo.list().unwrap().is_empty());

        // Deleting again (or any unknown id) is a no-op.
        repo.delete(user.id).unwrap();
        repo.delete(UserId::generate()).unwrap();
    }

    #[test]
    fn test_bootstrap_admin_created_once() {
        let store = Store::in_memory();
        let repo = UserRepository::new(&store);
        let email = Email::parse(RESERVED_ADMIN_EMAIL).unwrap();

        repo.ensure_bootstrap_admin(&email, "$hash$one").unwrap();
        repo.ensure_bootstrap_admin(&email, "$hash$two").unwrap();

        let users = repo.list().unwrap();
        assert_eq!(users.len(), 1);
        let admin = users.first().unwrap();
        assert_eq!(admin.role, Role::Admin);
        // The second call must not rotate the existing password.
        assert_eq!(admin.password_hash, "$hash$one");
    }
}
