//! The request gateway: HTTP plumbing between the resource layer and the
//! storefront backend.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async gateway; injects the bearer credential
//! - [`HttpRequest`]: a request descriptor, built per call
//! - [`HttpResponse`]: the raw status, headers and body text
//! - [`HttpMethod`]: GET, POST, PUT, DELETE
//! - [`HttpError`]: transport and request-validation failures
//!
//! The gateway performs no status-code interpretation and no retries. It is
//! the only layer that lets a transport failure escape as an error; the
//! resource layer above converts it into an [`ApiError`](crate::ApiError).
//!
//! # Example
//!
//! ```rust,ignore
//! use eshop_client::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(&config, tokens)?;
//! let request = HttpRequest::builder(HttpMethod::Get, "/api/cart/count").build()?;
//! let response = client.request(request).await?;
//! println!("{} -> {}", response.code, response.text());
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
