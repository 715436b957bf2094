//! User entity.

use crate::domain::value_objects::Email;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as owned by the repository.
///
/// Caches only ever hold serialized copies of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name, trimmed and non-empty.
    pub name: String,

    /// Normalized email address.
    pub email: Email,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; `None` while the user is live.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new live user with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Email) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name: name.into(),
            email,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Replaces the display name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Replaces the email address.
    pub fn change_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    /// Marks the user as deleted.
    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Returns true once the user has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> User {
        User::new("Jane", Email::new("jane@x.com").unwrap())
    }

    #[test]
    fn test_new_user_is_live() {
        let user = jane();
        assert!(!user.is_deleted());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_rename_touches_updated_at() {
        let mut user = jane();
        let before = user.updated_at;
        user.rename("Janet");
        assert_eq!(user.name, "Janet");
        assert!(user.updated_at >= before);
    }

    #[test]
    fn test_mark_deleted() {
        let mut user = jane();
        user.mark_deleted();
        assert!(user.is_deleted());
    }

    #[test]
    fn test_serde_roundtrip_keeps_nullable_fields() {
        let mut user = jane();
        let live: User = serde_json::from_slice(&serde_json::to_vec(&user).unwrap()).unwrap();
        assert_eq!(live, user);
        assert!(live.deleted_at.is_none());

        user.mark_deleted();
        let deleted: User = serde_json::from_slice(&serde_json::to_vec(&user).unwrap()).unwrap();
        assert_eq!(deleted, user);
        assert!(deleted.deleted_at.is_some());
    }
}
