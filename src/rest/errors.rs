//! Error type for resource operations.
//!
//! Every [`ShopClient`](crate::rest::ShopClient) operation returns
//! `Result<T, ApiError>`. The error keeps what went wrong ([`ApiErrorKind`]),
//! the HTTP status when there was one, and the server's message.
//!
//! Status codes map to kinds as follows:
//!
//! - **401, 403**: [`ApiErrorKind::Auth`] (a 401 also clears the stored token)
//! - **Other 4xx**: [`ApiErrorKind::Client`]
//! - **5xx**: [`ApiErrorKind::Server`]
//!
//! Transport failures become [`ApiErrorKind::Network`] and undecodable 2xx
//! bodies become [`ApiErrorKind::Decode`].
//!
//! # Example
//!
//! ```rust,ignore
//! use eshop_client::{ApiError, ApiErrorKind};
//!
//! match client.add_to_cart(&sku, quantity).await {
//!     Ok(item) => println!("Added {}", item.quantity),
//!     Err(e) if e.is_unauthorized() => println!("Session expired, log in again"),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, InvalidHttpRequestError};

/// Broad category of an [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The request never produced a response.
    Network,
    /// The backend rejected the credential (401) or the access (403).
    Auth,
    /// The backend rejected the request (4xx other than 401/403).
    Client,
    /// The backend failed (5xx).
    Server,
    /// A 2xx response whose body did not match the expected shape.
    Decode,
}

impl ApiErrorKind {
    /// Maps a non-2xx status code to its kind.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth,
            500..=599 => Self::Server,
            _ => Self::Client,
        }
    }

    /// Returns the kind name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::Client => "client",
            Self::Server => "server",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a resource operation.
///
/// # Example
///
/// ```rust
/// use eshop_client::{ApiError, ApiErrorKind};
///
/// let error = ApiError::from_status(404, "Ürün bulunamadı", None);
/// assert_eq!(error.kind(), ApiErrorKind::Client);
/// assert_eq!(error.status(), Some(404));
/// assert!(error.is_not_found());
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error)]
#[error("{kind} error: {message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    status: Option<u16>,
    message: String,
    request_id: Option<String>,
}

impl ApiError {
    /// Creates an error for a non-2xx response.
    ///
    /// `body` is the raw response text. A JSON body with a `message` or
    /// `error` string field contributes that field; any other body is used
    /// as-is.
    #[must_use]
    pub fn from_status(status: u16, body: &str, request_id: Option<&str>) -> Self {
        let detail = extract_message(body);
        let message = if detail.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {detail}")
        };

        Self {
            kind: ApiErrorKind::from_status(status),
            status: Some(status),
            message,
            request_id: request_id.map(ToString::to_string),
        }
    }

    /// Creates an error for a non-2xx [`HttpResponse`].
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        Self::from_status(response.code, response.text(), response.request_id())
    }

    /// Creates a [`ApiErrorKind::Decode`] error for a 2xx response body that
    /// could not be parsed.
    #[must_use]
    pub fn decode(status: u16, detail: impl fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: Some(status),
            message: format!("unexpected response body: {detail}"),
            request_id: None,
        }
    }

    /// Creates an error for a request body that could not be serialized.
    #[must_use]
    pub fn encode(detail: impl fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Client,
            status: None,
            message: format!("failed to encode request body: {detail}"),
            request_id: None,
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the `X-Request-Id` of the failed response, if the backend sent one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns `true` for a 401 response.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Returns `true` for a 403 response.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status == Some(403)
    }

    /// Returns `true` for a 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Returns `true` if no response was received.
    #[must_use]
    pub fn is_network(&self) -> bool {
        self.kind == ApiErrorKind::Network
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        let kind = if error.is_network() {
            ApiErrorKind::Network
        } else {
            ApiErrorKind::Client
        };
        Self {
            kind,
            status: None,
            message: error.to_string(),
            request_id: None,
        }
    }
}

impl From<InvalidHttpRequestError> for ApiError {
    fn from(error: InvalidHttpRequestError) -> Self {
        HttpError::from(error).into()
    }
}

fn extract_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed)
    {
        for field in ["message", "error"] {
            if let Some(serde_json::Value::String(message)) = map.get(field) {
                return message.clone();
            }
        }
    }
    trimmed.to_string()
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
