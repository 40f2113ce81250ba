//! Validated login and registration input.
//!
//! These types are the only way to call the auth endpoints, so malformed
//! form data is rejected before a request is built.

use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A trimmed, non-empty email address containing `@`.
///
/// # Example
///
/// ```rust
/// use eshop_client::auth::Email;
///
/// let email = Email::new("  a@b.com ").unwrap();
/// assert_eq!(email.as_ref(), "a@b.com");
/// assert!(Email::new("").is_err());
/// assert!(Email::new("not-an-email").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for blank input and
    /// [`ValidationError::InvalidEmail`] when there is no `@` between a
    /// non-empty local part and domain.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace) =>
            {
                Ok(Self(email.to_string()))
            }
            _ => Err(ValidationError::InvalidEmail {
                email: email.to_string(),
            }),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A non-empty password. Debug output is masked.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Creates a password, rejecting empty input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] if `password` is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        Ok(Self(password))
    }

    /// Returns the password length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Always `false`; a `Password` cannot be empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// Login request body: `{email, password}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: Email,
    /// Account password.
    pub password: Password,
}

impl Credentials {
    /// Validates raw login form input.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, email first.
    pub fn new(email: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }
}

/// Registration request body: `{email, password, confirmPassword}`.
///
/// # Example
///
/// ```rust
/// use eshop_client::auth::Registration;
/// use eshop_client::ValidationError;
///
/// assert!(Registration::new("a@b.com", "longenough", "longenough").is_ok());
/// assert_eq!(
///     Registration::new("a@b.com", "short", "short").unwrap_err(),
///     ValidationError::PasswordTooShort { min: 8 }
/// );
/// assert_eq!(
///     Registration::new("a@b.com", "longenough", "different").unwrap_err(),
///     ValidationError::PasswordMismatch
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Account email.
    pub email: Email,
    /// Chosen password.
    pub password: Password,
    /// Repeated password.
    pub confirm_password: Password,
}

impl Registration {
    /// Validates raw registration form input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PasswordTooShort`] when the password has
    /// fewer than [`MIN_PASSWORD_LENGTH`] characters and
    /// [`ValidationError::PasswordMismatch`] when the confirmation differs.
    pub fn new(email: &str, password: &str, confirm_password: &str) -> Result<Self, ValidationError> {
        let email = Email::new(email)?;
        let password = Password::new(password)?;
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if password.as_ref() != confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(Self {
            email,
            confirm_password: password.clone(),
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_rejects_missing_parts() {
        assert!(matches!(
            Email::new("@b.com"),
            Err(ValidationError::InvalidEmail { .. })
        ));
        assert!(matches!(
            Email::new("a@"),
            Err(ValidationError::InvalidEmail { .. })
        ));
        assert!(matches!(
            Email::new("a b@c.com"),
            Err(ValidationError::InvalidEmail { .. })
        ));
    }

    #[test]
    fn test_blank_email_reports_empty_field() {
        assert_eq!(
            Email::new("   ").unwrap_err(),
            ValidationError::Empty { field: "email" }
        );
    }

    #[test]
    fn test_password_debug_is_masked() {
        let password = Password::new("secret1").unwrap();
        assert_eq!(format!("{password:?}"), "Password(*****)");
    }

    #[test]
    fn test_password_length_counts_characters() {
        let password = Password::new("şifreğüç").unwrap();
        assert_eq!(password.len(), 8);
    }

    #[test]
    fn test_credentials_serialize_to_login_body() {
        let credentials = Credentials::new("a@b.com", "secret1").unwrap();
        assert_eq!(
            serde_json::to_value(&credentials).unwrap(),
            json!({"email": "a@b.com", "password": "secret1"})
        );
    }

    #[test]
    fn test_credentials_reject_empty_password() {
        assert_eq!(
            Credentials::new("a@b.com", "").unwrap_err(),
            ValidationError::Empty { field: "password" }
        );
    }

    #[test]
    fn test_registration_serializes_confirm_password_in_camel_case() {
        let registration = Registration::new("a@b.com", "password1", "password1").unwrap();
        assert_eq!(
            serde_json::to_value(&registration).unwrap(),
            json!({
                "email": "a@b.com",
                "password": "password1",
                "confirmPassword": "password1"
            })
        );
    }
}
