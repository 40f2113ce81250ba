//! Error types for configuration and input validation.
//!
//! Configuration constructors return `Result<T, ConfigError>` so a client can
//! never be built against a malformed backend URL. Input constructors for
//! login, cart, address and payment-method data return
//! `Result<T, ValidationError>`; a value that fails validation never reaches
//! the network layer.
//!
//! # Example
//!
//! ```rust
//! use eshop_client::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://shop.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A default header name or value cannot be sent over HTTP.
    #[error("Invalid default header '{name}'.")]
    InvalidHeader {
        /// The header name that was rejected.
        name: String,
    },
}

/// Errors raised when user input fails client-side validation.
///
/// Every variant names the offending field so a caller can attach the
/// message to the matching form input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty or whitespace only.
    #[error("Field '{field}' cannot be empty.")]
    Empty {
        /// The name of the empty field.
        field: &'static str,
    },

    /// The email address is not plausibly an email address.
    #[error("Invalid email address '{email}'.")]
    InvalidEmail {
        /// The rejected email address.
        email: String,
    },

    /// The password is shorter than the registration minimum.
    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort {
        /// The minimum accepted length.
        min: usize,
    },

    /// The password and its confirmation differ.
    #[error("Password confirmation does not match.")]
    PasswordMismatch,

    /// A quantity of zero was supplied.
    #[error("Quantity must be a positive integer.")]
    InvalidQuantity,

    /// The card number has the wrong length or contains non-digits.
    #[error("Card number must be 13 to 19 digits.")]
    InvalidCardNumber,

    /// The CVV has the wrong length or contains non-digits.
    #[error("CVV must be 3 or 4 digits.")]
    InvalidCvv,

    /// The cardholder name contains characters other than letters and spaces.
    #[error("Cardholder name may only contain letters.")]
    InvalidCardholderName,

    /// The expiry date is not in `MM/YY` form.
    #[error("Expiry date '{value}' must be in MM/YY format.")]
    InvalidExpiryDate {
        /// The rejected expiry date.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "ftp//broken".to_string(),
        };
        assert!(error.to_string().contains("ftp//broken"));
    }

    #[test]
    fn test_validation_error_names_field() {
        let error = ValidationError::Empty { field: "city" };
        assert_eq!(error.to_string(), "Field 'city' cannot be empty.");
    }

    #[test]
    fn test_password_too_short_mentions_minimum() {
        let error = ValidationError::PasswordTooShort { min: 8 };
        assert!(error.to_string().contains('8'));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &ConfigError::MissingRequiredField { field: "x" };
        let _: &dyn std::error::Error = &ValidationError::InvalidCvv;
    }
}
