//! Console domain model for tenant-scoped church records.
//!
//! # Responsibility
//! - Define the actor, tenant and record shapes shared by every core module.
//! - Decode the external API wire format (ids as strings or integers).
//!
//! # Invariants
//! - Every meeting/task/user/payment references at most one tenant.
//! - Models are plain values; no module mutates an `Actor` after login.

pub mod account;
pub mod actor;
pub mod id;
pub mod meeting;
pub mod task;
pub mod tenant;

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Form-level validation failure for people and user accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Required text field is blank after trim.
    MissingField(&'static str),
    /// E-mail does not look like `local@domain.tld`.
    InvalidEmail(String),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for RecordValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::MissingField(field));
    }
    Ok(())
}

pub(crate) fn validate_email(value: &str) -> Result<(), RecordValidationError> {
    require_text("email", value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(RecordValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_email, RecordValidationError};

    #[test]
    fn email_validation_accepts_plain_addresses() {
        validate_email("jane@grace.org").expect("plain address should pass");
        validate_email("  pastor.john@example.co.uk ").expect("trimmed address should pass");
    }

    #[test]
    fn email_validation_rejects_blank_and_malformed_values() {
        assert_eq!(
            validate_email("  ").expect_err("blank email must fail"),
            RecordValidationError::MissingField("email")
        );
        assert!(matches!(
            validate_email("jane@grace").expect_err("missing tld must fail"),
            RecordValidationError::InvalidEmail(_)
        ));
        assert!(matches!(
            validate_email("jane doe@grace.org").expect_err("whitespace must fail"),
            RecordValidationError::InvalidEmail(_)
        ));
    }
}
