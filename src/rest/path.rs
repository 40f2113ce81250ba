//! Endpoint definitions and path building.
//!
//! Each resource declares its endpoints as [`Endpoint`] constants: the HTTP
//! method plus a path template with `{name}` placeholders. [`build_path`]
//! fills the placeholders, percent-encoding every value so that a SKU such as
//! `KAHVE/01` stays a single path segment.
//!
//! # Example
//!
//! ```rust
//! use eshop_client::rest::{build_path, Endpoint};
//! use eshop_client::clients::HttpMethod;
//!
//! const REMOVE: Endpoint = Endpoint::new(HttpMethod::Delete, "/api/cart/remove/{sku}");
//!
//! let path = build_path(REMOVE.template, &[("sku", &"KAHVE 01")]);
//! assert_eq!(path, "/api/cart/remove/KAHVE%2001");
//! ```

use std::fmt::Display;

use crate::clients::{HttpMethod, HttpRequest, HttpRequestBuilder};

/// A REST endpoint: method plus path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// The HTTP method for this endpoint.
    pub http_method: HttpMethod,
    /// The path template, e.g. `/api/orders/{id}`.
    pub template: &'static str,
}

impl Endpoint {
    /// Creates a new endpoint definition.
    #[must_use]
    pub const fn new(http_method: HttpMethod, template: &'static str) -> Self {
        Self {
            http_method,
            template,
        }
    }

    /// Starts a request to this endpoint with the placeholders filled.
    #[must_use]
    pub fn request(&self, params: &[(&str, &dyn Display)]) -> HttpRequestBuilder {
        HttpRequest::builder(self.http_method, build_path(self.template, params))
    }
}

/// Builds a path by replacing `{name}` placeholders with percent-encoded values.
///
/// Placeholders without a matching parameter are left untouched.
#[must_use]
pub fn build_path(template: &str, params: &[(&str, &dyn Display)]) -> String {
    let mut result = template.to_string();

    for (key, value) in params {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Endpoint>();
};
