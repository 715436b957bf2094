//! Email value object.

use crate::StrataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;

/// Reasons an address is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    /// Nothing left after trimming.
    #[error("Email must not be empty")]
    Empty,
    /// Not a syntactically valid address.
    #[error("Invalid email address: {0}")]
    Invalid(String),
}

impl From<EmailError> for StrataError {
    fn from(err: EmailError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// A normalized (trimmed, lowercased) and validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalizes and validates an address.
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        if !email.validate_email() {
            return Err(EmailError::Invalid(email));
        }

        Ok(Self(email))
    }

    /// Returns the email as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the domain part of the email (after @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalization() {
        let email = Email::new("  JANE@X.COM  ").unwrap();
        assert_eq!(email.as_str(), "jane@x.com");
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(Email::new("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_invalid_email() {
        assert!(matches!(Email::new("invalid"), Err(EmailError::Invalid(_))));
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("test@").is_err());
    }

    #[test]
    fn test_email_domain() {
        let email = Email::new("user+tag@mail.example.com").unwrap();
        assert_eq!(email.domain(), "mail.example.com");
    }

    #[test]
    fn test_email_serde() {
        let email = Email::new("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");
        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    }

    #[test]
    fn test_email_error_maps_to_validation() {
        let err: StrataError = Email::new("bad").unwrap_err().into();
        assert!(matches!(err, StrataError::Validation(_)));
    }
}
