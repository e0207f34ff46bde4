//! User directory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodipy_core::{Email, Role, UserId};

use super::session::SessionUser;

/// A directory record, as persisted.
///
/// The password hash stays on the record: the admin account screen is the
/// only surface that lists full records, and it gates display behind a
/// reveal toggle rather than asking the data layer to filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The session view of this record, password hash stripped.
    #[must_use]
    pub fn to_session(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Input for creating a directory record.
///
/// The password arrives pre-hashed; hashing lives with the services so the
/// directory never sees plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Requested role; overridden to admin for the reserved address.
    pub role: Role,
}

/// Field-by-field partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
}
