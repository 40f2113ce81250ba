//! Error types for the request gateway.
//!
//! The gateway interprets no status codes, so it only fails in two ways:
//!
//! - [`InvalidHttpRequestError`]: the request was malformed and never sent
//! - [`HttpError::Network`]: the transport failed (DNS, refused connection,
//!   timeout, unreadable body)
//!
//! # Example
//!
//! ```rust,ignore
//! use eshop_client::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Status {}", response.code),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//!     Err(e) => println!("Request not sent: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation before sending.
///
/// # Example
///
/// ```rust
/// use eshop_client::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A request header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The rejected header name.
        name: String,
    },
}

/// Unified error type for the request gateway.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed; nothing was sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` for transport-level failures.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
