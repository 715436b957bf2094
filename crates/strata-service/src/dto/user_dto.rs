//! User-related DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(max = 128, message = "Name cannot exceed 128 characters"))]
    pub name: String,

    #[validate(length(max = 254, message = "Email cannot exceed 254 characters"))]
    pub email: String,
}

impl CreateUserRequest {
    /// Creates a new request.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 128, message = "Name cannot exceed 128 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 254, message = "Email cannot exceed 254 characters"))]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Request that only renames the user.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    /// Request that only changes the email.
    pub fn change_email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(email.into()),
        }
    }
}
