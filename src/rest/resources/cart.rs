//! The signed-in user's shopping cart.
//!
//! Every cart endpoint requires a token. Items are addressed by product
//! [`Sku`]; quantities are validated [`Quantity`] values.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::HttpMethod;
use crate::error::ValidationError;
use crate::rest::client::json_body;
use crate::rest::resources::Sku;
use crate::rest::response::{decode_count, decode_json, decode_optional_json};
use crate::rest::{ApiError, Endpoint, ShopClient};

const GET: Endpoint = Endpoint::new(HttpMethod::Get, "/api/cart");
const ADD: Endpoint = Endpoint::new(HttpMethod::Post, "/api/cart/add");
const UPDATE: Endpoint = Endpoint::new(HttpMethod::Put, "/api/cart/update");
const REMOVE: Endpoint = Endpoint::new(HttpMethod::Delete, "/api/cart/remove/{sku}");
const CLEAR: Endpoint = Endpoint::new(HttpMethod::Delete, "/api/cart/clear");
const COUNT: Endpoint = Endpoint::new(HttpMethod::Get, "/api/cart/count");
const TOTAL: Endpoint = Endpoint::new(HttpMethod::Get, "/api/cart/total");

/// A positive item quantity.
///
/// # Example
///
/// ```rust
/// use eshop_client::rest::resources::Quantity;
///
/// assert_eq!(Quantity::new(2).unwrap().get(), 2);
/// assert!(Quantity::new(0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Creates a validated quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidQuantity`] for zero.
    pub const fn new(quantity: u32) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity);
        }
        Ok(Self(quantity))
    }

    /// Returns the quantity as an integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(quantity: i64) -> Result<Self, Self::Error> {
        u32::try_from(quantity)
            .map_err(|_| ValidationError::InvalidQuantity)
            .and_then(Self::new)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Backend identifier of the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// SKU of the product on this line.
    pub product_sku: String,

    /// Display name of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    /// Units on this line.
    pub quantity: u32,

    /// Price of one unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,

    /// `unit_price * quantity`, as computed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,

    /// When the line was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

/// The full cart with totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Backend identifier of the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<Uuid>,

    /// Owner of the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    /// Cart lines.
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Sum of all line quantities.
    #[serde(default)]
    pub total_item_count: u32,

    /// Number of distinct SKUs.
    #[serde(default)]
    pub unique_item_count: u32,

    /// Sum of all line totals.
    #[serde(default)]
    pub total_amount: f64,

    /// When the cart last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

impl Cart {
    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of clearing the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartClearResult {
    /// Owner of the cleared cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    /// Backend confirmation message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number of lines removed.
    #[serde(default)]
    pub removed_item_count: u32,

    /// When the cart was cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared_at: Option<DateTime<Utc>>,

    /// Whether the backend reports success.
    #[serde(default)]
    pub success: bool,
}

/// Body for adding or updating a cart line: `{productSku, quantity}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct CartLine<'a> {
    product_sku: &'a Sku,
    quantity: Quantity,
}

impl ShopClient {
    /// Fetches the cart.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] of kind `Auth` when not signed in.
    pub async fn get_cart(&self) -> Result<Cart, ApiError> {
        let response = self.send(GET.request(&[]).build()?).await?;
        decode_json(&response)
    }

    /// Adds `quantity` units of `sku` to the cart.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] with status 404 for an unknown SKU, or a
    /// client error when stock is insufficient.
    pub async fn add_to_cart(&self, sku: &Sku, quantity: Quantity) -> Result<CartItem, ApiError> {
        let body = json_body(&CartLine {
            product_sku: sku,
            quantity,
        })?;
        let response = self.send(ADD.request(&[]).body(body).build()?).await?;
        decode_json(&response)
    }

    /// Sets the quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the line does not exist or the request fails.
    pub async fn update_cart_item(
        &self,
        sku: &Sku,
        quantity: Quantity,
    ) -> Result<CartItem, ApiError> {
        let body = json_body(&CartLine {
            product_sku: sku,
            quantity,
        })?;
        let response = self.send(UPDATE.request(&[]).body(body).build()?).await?;
        decode_json(&response)
    }

    /// Removes a cart line, or only `quantity` units of it.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the backend refuses the removal.
    pub async fn remove_from_cart(
        &self,
        sku: &Sku,
        quantity: Option<Quantity>,
    ) -> Result<(), ApiError> {
        let mut builder = REMOVE.request(&[("sku", sku)]);
        if let Some(quantity) = quantity {
            builder = builder.query_param("quantity", quantity);
        }
        self.send(builder.build()?).await?;
        Ok(())
    }

    /// Empties the cart.
    ///
    /// Returns `None` when the backend answers with an empty body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn clear_cart(&self) -> Result<Option<CartClearResult>, ApiError> {
        let response = self.send(CLEAR.request(&[]).build()?).await?;
        decode_optional_json(&response)
    }

    /// Returns the total number of units in the cart.
    ///
    /// A body that is not a non-negative integer counts as 0.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] only for transport failures and non-2xx
    /// statuses.
    pub async fn get_cart_count(&self) -> Result<u32, ApiError> {
        let response = self.send(COUNT.request(&[]).build()?).await?;
        Ok(decode_count(&response))
    }

    /// Returns the cart's total amount.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is not a number.
    pub async fn get_cart_total(&self) -> Result<f64, ApiError> {
        let response = self.send(TOTAL.request(&[]).build()?).await?;
        decode_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_rejects_zero_and_negative() {
        assert_eq!(Quantity::new(0).unwrap_err(), ValidationError::InvalidQuantity);
        assert_eq!(
            Quantity::try_from(-2_i64).unwrap_err(),
            ValidationError::InvalidQuantity
        );
        assert_eq!(Quantity::try_from(5_i64).unwrap().get(), 5);
    }

    #[test]
    fn test_cart_line_body_shape() {
        let sku = Sku::new("SKU1").unwrap();
        let body = json_body(&CartLine {
            product_sku: &sku,
            quantity: Quantity::new(2).unwrap(),
        })
        .unwrap();
        assert_eq!(body, json!({"productSku": "SKU1", "quantity": 2}));
    }

    #[test]
    fn test_cart_deserialization() {
        let cart: Cart = serde_json::from_value(json!({
            "cartId": "0d6b7a2c-1111-4a4a-8b8b-222233334444",
            "userId": "5e5e5e5e-aaaa-4bbb-8ccc-dddddddddddd",
            "items": [{
                "id": "9f9f9f9f-0000-4000-8000-000000000001",
                "productSku": "SKU1",
                "productName": "Kupa",
                "quantity": 2,
                "unitPrice": 50.0,
                "totalPrice": 100.0,
                "addedAt": "2024-06-01T09:00:00Z"
            }],
            "totalItemCount": 2,
            "uniqueItemCount": 1,
            "totalAmount": 100.0,
            "lastUpdate": "2024-06-01T09:00:00Z"
        }))
        .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_sku, "SKU1");
        assert_eq!(cart.total_item_count, 2);
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_empty_cart_defaults() {
        let cart: Cart = serde_json::from_value(json!({})).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count, 0);
    }

    #[test]
    fn test_cart_clear_result_deserialization() {
        let result: CartClearResult = serde_json::from_value(json!({
            "message": "Sepet temizlendi",
            "removedItemCount": 3,
            "success": true
        }))
        .unwrap();
        assert!(result.success);
        assert_eq!(result.removed_item_count, 3);
    }
}
