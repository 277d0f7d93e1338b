//! Input validation applied before anything is sent to the backend

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CoreError, CoreResult};
use crate::types::{NewLinkedAccount, NewUser, UserUpdate};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Trait for validating operator input
pub trait Validate {
    /// Returns Ok(()) if valid, or an error naming the first offending field
    fn validate(&self) -> CoreResult<()>;
}

impl Validate for NewUser {
    fn validate(&self) -> CoreResult<()> {
        validators::validate_not_empty(&self.name, "name")?;
        validators::validate_not_empty(&self.email, "email")?;
        validators::validate_email(&self.email, "email")
    }
}

impl Validate for UserUpdate {
    fn validate(&self) -> CoreResult<()> {
        match self.email.as_deref() {
            Some(email) if !email.is_empty() => validators::validate_email(email, "email"),
            _ => Ok(()),
        }
    }
}

impl Validate for NewLinkedAccount {
    fn validate(&self) -> CoreResult<()> {
        validators::validate_not_empty(&self.platform, "platform")?;
        validators::validate_not_empty(&self.username, "username")?;
        validators::validate_not_empty(&self.email, "email")?;
        validators::validate_email(&self.email, "email")?;
        validators::validate_not_empty(&self.role, "role")
    }
}

/// Common validation helpers
pub mod validators {
    use super::{CoreError, CoreResult, EMAIL_PATTERN};

    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field: &str) -> CoreResult<()> {
        if value.trim().is_empty() {
            return Err(CoreError::validation(field, "is required"));
        }
        Ok(())
    }

    /// Validate an id that becomes a single URL path segment.
    ///
    /// `.` and `..` would be resolved away by the URL and address the parent
    /// resource instead.
    pub fn validate_path_segment(value: &str, field: &str) -> CoreResult<()> {
        validate_not_empty(value, field)?;
        if matches!(value, "." | "..") {
            return Err(CoreError::validation(field, "is not a valid id"));
        }
        Ok(())
    }

    /// Validate email format
    pub fn validate_email(email: &str, field: &str) -> CoreResult<()> {
        if !EMAIL_PATTERN.is_match(email) {
            return Err(CoreError::validation(field, "invalid email format"));
        }
        Ok(())
    }
}
