//! # eshop-client
//!
//! A session and REST gateway client for the eShopping storefront API.
//!
//! ## Overview
//!
//! The crate is layered, leaves first:
//!
//! - [`TokenStore`]: holds the single bearer token under the `jwt_token` key
//!   of a [`KeyValueStore`] (in memory or in a JSON file)
//! - [`HttpClient`]: the gateway; adds JSON headers and `Authorization: Bearer`
//!   when a token is stored, and returns raw responses
//! - [`ShopClient`]: one async method per REST operation, returning
//!   `Result<T, ApiError>`; a 401 from any operation clears the token
//! - [`Storefront`]: the page-facing facade; collapses every error into an
//!   empty list, `None`, `false` or `0`
//!
//! Input types such as [`Credentials`](auth::Credentials),
//! [`Sku`](rest::resources::Sku) and
//! [`NewPaymentMethod`](rest::resources::NewPaymentMethod) validate on
//! construction, so invalid form data never reaches the network.
//!
//! ## Quick Start
//!
//! ```rust
//! use eshop_client::{BaseUrl, ClientConfig, TokenStore};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080").unwrap())
//!     .user_agent_prefix("ShopCli/1.0")
//!     .build()
//!     .unwrap();
//!
//! let tokens = TokenStore::in_memory();
//! assert!(!tokens.is_authenticated());
//! ```
//!
//! ## Shopping
//!
//! ```rust,ignore
//! use eshop_client::{Storefront, TokenStore};
//! use eshop_client::auth::Credentials;
//! use eshop_client::rest::resources::{Address, CheckoutRequest, Quantity, Sku};
//!
//! let shop = Storefront::new(&config, TokenStore::file("session.json"))?;
//! shop.login(&Credentials::new("a@b.com", "secret1")?).await?;
//!
//! shop.add_to_cart(&Sku::new("KAHVE-01")?, Quantity::new(2)?).await;
//! println!("{} items in cart", shop.get_cart_count().await);
//!
//! let methods = shop.get_payment_methods().await.unwrap_or_default();
//! let shipping = Address::new("İstanbul", "Kadıköy", "Moda", "Bahariye Cd.", "12")?;
//! // Responses may omit the sequence number; only numbered methods can pay.
//! let sequence_number = methods
//!     .iter()
//!     .filter(|m| m.is_active)
//!     .find_map(|m| m.sequence_number);
//! if let Some(sequence_number) = sequence_number {
//!     let checkout = CheckoutRequest::new(shipping, sequence_number)?;
//!     if let Some(order) = shop.checkout(&checkout).await {
//!         shop.initiate_payment(order.id, sequence_number).await;
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (request dispatch at `debug`, token
//! clearing and collapsed errors at `warn`) and never installs a subscriber.
//! Tokens are never logged.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod storefront;

// Re-export public types at crate root for convenience
pub use auth::{FileStore, KeyValueStore, MemoryStore, TokenClaims, TokenStore, TOKEN_KEY};
pub use config::{BaseUrl, ClientConfig, ClientConfigBuilder};
pub use error::{ConfigError, ValidationError};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError,
};

// Re-export resource client types
pub use rest::{ApiError, ApiErrorKind, ShopClient};
pub use storefront::{AuthFailure, Storefront};
