//! The resource client.
//!
//! [`ShopClient`] wraps the [`HttpClient`] gateway and owns the status-code
//! policy shared by every operation. The operations themselves live in the
//! resource modules under [`crate::rest::resources`], each as an
//! `impl ShopClient` block.

use serde::Serialize;

use crate::auth::TokenStore;
use crate::clients::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::config::ClientConfig;
use crate::rest::ApiError;

/// Typed client for the storefront REST API.
///
/// # Status handling
///
/// - 2xx: the body is decoded per operation
/// - 401: the stored token is cleared and an auth error returned
/// - 403: an auth error is returned; the token is kept
/// - other 4xx and 5xx: a client or server error; the token is kept
///
/// # Thread Safety
///
/// `ShopClient` is `Send + Sync` and can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use eshop_client::{BaseUrl, ClientConfig, ShopClient, TokenStore};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("http://localhost:8080")?)
///     .build()?;
/// let client = ShopClient::new(&config, TokenStore::file("session.json"))?;
///
/// for product in client.get_products().await? {
///     println!("{} {}", product.sku, product.name);
/// }
/// ```
#[derive(Debug)]
pub struct ShopClient {
    http_client: HttpClient,
}

// Verify ShopClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopClient>();
};

impl ShopClient {
    /// Creates a client for `config` using `tokens` as the session store.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientInit`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Result<Self, HttpError> {
        Ok(Self {
            http_client: HttpClient::new(config, tokens)?,
        })
    }

    /// Wraps an existing gateway.
    #[must_use]
    pub const fn from_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Returns the underlying gateway.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the session store.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        self.http_client.tokens()
    }

    /// Sends `request` and applies the shared status policy.
    ///
    /// Returns the response only for 2xx statuses.
    pub(crate) async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.http_method;
        let path = request.path.clone();

        let response = self.http_client.request(request).await?;
        if response.is_ok() {
            return Ok(response);
        }

        if response.code == 401 {
            tracing::warn!(
                "Received 401 for {} {}; clearing stored token",
                method,
                path
            );
            self.tokens().remove();
        }

        Err(ApiError::from_response(&response))
    }
}

/// Serializes a request body.
pub(crate) fn json_body<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(ApiError::encode)
}
