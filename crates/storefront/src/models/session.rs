//! Session records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodipy_core::{Email, Role, UserId};

/// The authenticated user as held in the session: the directory record
/// with the password hash stripped. Persisted under its own storage key so
/// a restart re-hydrates the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl SessionUser {
    /// Whether this session may use the admin surface.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
