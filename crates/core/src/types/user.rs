//! User records.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A registered user as exposed to clients.
///
/// The password is write-only: it is accepted on creation, stored as a hash,
/// and never read back into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    /// Unique, client-chosen key.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address. Only its type is checked, never its format.
    pub email: String,
}

/// A user that passed validation and is ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// `argon2` PHC string of the submitted password.
    pub password_hash: String,
}

impl NewUser {
    /// The public record this insert will produce.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
