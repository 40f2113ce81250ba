//! The page-facing facade.
//!
//! [`Storefront`] exposes every [`ShopClient`] operation with a failure
//! sentinel instead of an error: an empty list, `None`, `false` or `0`.
//! Login and registration keep the status code in an [`AuthFailure`] so the
//! page can tell bad credentials from an unreachable backend.
//!
//! Every collapsed error is logged with `tracing::warn!` before it is
//! discarded.
//!
//! # Example
//!
//! ```rust,ignore
//! use eshop_client::{BaseUrl, ClientConfig, Storefront, TokenStore};
//! use eshop_client::auth::Credentials;
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080")?)
//!     .build()?;
//! let shop = Storefront::new(&config, TokenStore::file("session.json"))?;
//!
//! match shop.login(&Credentials::new("a@b.com", "secret1")?).await {
//!     Ok(_) => println!("Welcome back"),
//!     Err(failure) if failure.status == 401 => println!("Wrong email or password"),
//!     Err(_) => println!("Try again later"),
//! }
//!
//! let badge = shop.get_cart_count().await;
//! ```

use thiserror::Error;
use uuid::Uuid;

use crate::auth::{Credentials, Registration, TokenStore};
use crate::clients::HttpError;
use crate::config::ClientConfig;
use crate::rest::resources::{
    Cart, CartClearResult, CartItem, CheckoutRequest, NewPaymentMethod, Order, Payment,
    PaymentMethod, PaymentMethodUpdate, Product, Quantity, Sku,
};
use crate::rest::{ApiError, ShopClient};

/// Login or registration failure.
///
/// `status` is the HTTP status of the rejection, or 0 when no response was
/// received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("authentication failed with status {status}")]
pub struct AuthFailure {
    /// HTTP status, or 0 for a transport failure.
    pub status: u16,
}

impl From<&ApiError> for AuthFailure {
    fn from(error: &ApiError) -> Self {
        Self {
            status: error.status().unwrap_or(0),
        }
    }
}

/// Sentinel-returning facade over [`ShopClient`].
#[derive(Debug)]
pub struct Storefront {
    client: ShopClient,
}

// Verify Storefront is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Storefront>();
};

impl Storefront {
    /// Creates a facade for `config` using `tokens` as the session store.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientInit`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Result<Self, HttpError> {
        Ok(Self {
            client: ShopClient::new(config, tokens)?,
        })
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn from_client(client: ShopClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client for callers that want structured errors.
    #[must_use]
    pub const fn client(&self) -> &ShopClient {
        &self.client
    }

    /// Returns the session store.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        self.client.tokens()
    }

    /// Returns `true` if a token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens().is_authenticated()
    }

    // Auth

    /// Logs in; on success the token is stored and returned.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] carrying the rejection status.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthFailure> {
        self.client.login(credentials).await.map_err(|e| {
            tracing::warn!("login failed: {e}");
            AuthFailure::from(&e)
        })
    }

    /// Registers; on success the token is stored and returned.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] carrying the rejection status.
    pub async fn register(&self, registration: &Registration) -> Result<String, AuthFailure> {
        self.client.register(registration).await.map_err(|e| {
            tracing::warn!("register failed: {e}");
            AuthFailure::from(&e)
        })
    }

    /// Clears the stored token.
    pub fn logout(&self) {
        self.client.logout();
    }

    // Products

    /// Lists all products, or an empty list on failure.
    pub async fn get_products(&self) -> Vec<Product> {
        collapse("get_products", self.client.get_products().await).unwrap_or_default()
    }

    /// Searches products by name, or returns an empty list on failure.
    pub async fn search_products(&self, term: &str) -> Vec<Product> {
        collapse("search_products", self.client.search_products(term).await).unwrap_or_default()
    }

    /// Fetches one product by SKU.
    pub async fn get_product(&self, sku: &Sku) -> Option<Product> {
        collapse("get_product", self.client.get_product(sku).await)
    }

    // Cart

    /// Fetches the user's cart.
    pub async fn get_cart(&self) -> Option<Cart> {
        collapse("get_cart", self.client.get_cart().await)
    }

    /// Adds `quantity` units of `sku` and returns the resulting line.
    pub async fn add_to_cart(&self, sku: &Sku, quantity: Quantity) -> Option<CartItem> {
        collapse("add_to_cart", self.client.add_to_cart(sku, quantity).await)
    }

    /// Sets a line's quantity and returns the updated line.
    pub async fn update_cart_item(&self, sku: &Sku, quantity: Quantity) -> Option<CartItem> {
        collapse(
            "update_cart_item",
            self.client.update_cart_item(sku, quantity).await,
        )
    }

    /// Returns `true` if the line (or `quantity` units of it) was removed.
    pub async fn remove_from_cart(&self, sku: &Sku, quantity: Option<Quantity>) -> bool {
        collapse(
            "remove_from_cart",
            self.client.remove_from_cart(sku, quantity).await,
        )
        .is_some()
    }

    /// Returns `true` if the cart was cleared, even when the backend sent no
    /// summary.
    pub async fn clear_cart(&self) -> bool {
        self.clear_cart_summary().await.is_some()
    }

    /// Clears the cart and returns the backend's summary, if any.
    ///
    /// The outer `None` means the request failed; the inner `None` means it
    /// succeeded without a body.
    pub async fn clear_cart_summary(&self) -> Option<Option<CartClearResult>> {
        collapse("clear_cart", self.client.clear_cart().await)
    }

    /// Returns the number of units in the cart, or 0 on any failure.
    pub async fn get_cart_count(&self) -> u32 {
        collapse("get_cart_count", self.client.get_cart_count().await).unwrap_or(0)
    }

    /// Returns the cart's total amount.
    pub async fn get_cart_total(&self) -> Option<f64> {
        collapse("get_cart_total", self.client.get_cart_total().await)
    }

    // Payment methods

    /// Lists saved payment methods; `None` on failure, so an empty list means none are saved.
    pub async fn get_payment_methods(&self) -> Option<Vec<PaymentMethod>> {
        collapse(
            "get_payment_methods",
            self.client.get_payment_methods().await,
        )
    }

    /// Fetches one saved payment method.
    pub async fn get_payment_method(&self, sequence_number: u32) -> Option<PaymentMethod> {
        collapse(
            "get_payment_method",
            self.client.get_payment_method(sequence_number).await,
        )
    }

    /// Saves a new card.
    pub async fn add_payment_method(&self, method: &NewPaymentMethod) -> Option<PaymentMethod> {
        collapse(
            "add_payment_method",
            self.client.add_payment_method(method).await,
        )
    }

    /// Renames a payment method or changes its default flag.
    pub async fn update_payment_method(
        &self,
        sequence_number: u32,
        update: &PaymentMethodUpdate,
    ) -> Option<PaymentMethod> {
        collapse(
            "update_payment_method",
            self.client
                .update_payment_method(sequence_number, update)
                .await,
        )
    }

    /// Returns `true` if the payment method was deleted.
    pub async fn delete_payment_method(&self, sequence_number: u32) -> bool {
        collapse(
            "delete_payment_method",
            self.client.delete_payment_method(sequence_number).await,
        )
        .is_some()
    }

    // Orders and payments

    /// Turns the cart into an order.
    pub async fn checkout(&self, checkout: &CheckoutRequest) -> Option<Order> {
        collapse("checkout", self.client.checkout(checkout).await)
    }

    /// Lists the user's orders, or an empty list on failure.
    pub async fn get_orders(&self) -> Vec<Order> {
        collapse("get_orders", self.client.get_orders().await).unwrap_or_default()
    }

    /// Fetches one order.
    pub async fn get_order(&self, order_id: Uuid) -> Option<Order> {
        collapse("get_order", self.client.get_order(order_id).await)
    }

    /// Cancels an order and returns its new state.
    pub async fn cancel_order(&self, order_id: Uuid) -> Option<Order> {
        collapse("cancel_order", self.client.cancel_order(order_id).await)
    }

    /// Starts payment of an order with a saved method.
    pub async fn initiate_payment(&self, order_id: Uuid, sequence_number: u32) -> Option<Payment> {
        collapse(
            "initiate_payment",
            self.client.initiate_payment(order_id, sequence_number).await,
        )
    }

    /// Lists an order's payments, or an empty list on failure.
    pub async fn get_order_payments(&self, order_id: Uuid) -> Vec<Payment> {
        collapse(
            "get_order_payments",
            self.client.get_order_payments(order_id).await,
        )
        .unwrap_or_default()
    }

    /// Lists the user's payments, or an empty list on failure.
    pub async fn get_payment_history(&self) -> Vec<Payment> {
        collapse(
            "get_payment_history",
            self.client.get_payment_history().await,
        )
        .unwrap_or_default()
    }
}

/// Logs and discards an error.
fn collapse<T>(operation: &str, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!("{} failed ({}): {}", operation, error.kind(), error);
            None
        }
    }
}
