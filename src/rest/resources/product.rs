//! Product catalog: listing, search and lookup by SKU.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::HttpMethod;
use crate::error::ValidationError;
use crate::rest::response::decode_json;
use crate::rest::{ApiError, Endpoint, ShopClient};

const ALL: Endpoint = Endpoint::new(HttpMethod::Get, "/api/products");
const SEARCH: Endpoint = Endpoint::new(HttpMethod::Get, "/api/products/search");
const FIND: Endpoint = Endpoint::new(HttpMethod::Get, "/api/products/{sku}");

/// A stock-keeping unit: trimmed and non-empty.
///
/// # Example
///
/// ```rust
/// use eshop_client::rest::resources::Sku;
///
/// let sku = Sku::new(" KAHVE-01 ").unwrap();
/// assert_eq!(sku.as_ref(), "KAHVE-01");
/// assert!(Sku::new("   ").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Creates a validated SKU.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for blank input.
    pub fn new(sku: impl Into<String>) -> Result<Self, ValidationError> {
        let sku = sku.into();
        let sku = sku.trim();
        if sku.is_empty() {
            return Err(ValidationError::Empty { field: "sku" });
        }
        Ok(Self(sku.to_string()))
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Stock-keeping unit, unique per product.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price.
    pub price: f64,

    /// ISO 4217 currency code, e.g. `TRY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Whether the product is listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Optimistic-lock version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    /// When the product was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Free-form attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,

    /// Units available for sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_stock: Option<i64>,

    /// Units held in carts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_stock: Option<i64>,
}

impl Product {
    /// Returns `true` if at least one unit is available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.available_stock.is_some_and(|stock| stock > 0)
    }
}

impl ShopClient {
    /// Lists all active products.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is not a
    /// product list.
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.send(ALL.request(&[]).build()?).await?;
        decode_json(&response)
    }

    /// Searches products by name. The term is URL-encoded.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is not a
    /// product list.
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        let request = SEARCH.request(&[]).query_param("name", term).build()?;
        let response = self.send(request).await?;
        decode_json(&response)
    }

    /// Fetches a single product.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] with status 404 if no product has this SKU.
    pub async fn get_product(&self, sku: &Sku) -> Result<Product, ApiError> {
        let response = self.send(FIND.request(&[("sku", sku)]).build()?).await?;
        decode_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sku_trims_and_rejects_blank() {
        assert_eq!(Sku::new("  SKU1 ").unwrap().to_string(), "SKU1");
        assert_eq!(
            Sku::new("").unwrap_err(),
            ValidationError::Empty { field: "sku" }
        );
    }

    #[test]
    fn test_product_deserialization_from_backend_json() {
        let product: Product = serde_json::from_value(json!({
            "id": "6f1c7f3e-4a8b-4d2e-9a57-1b2c3d4e5f60",
            "sku": "KAHVE-01",
            "name": "Türk Kahvesi",
            "description": "Orta kavrulmuş",
            "price": 149.90,
            "currency": "TRY",
            "isActive": true,
            "version": 3,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-02T12:30:00.123Z",
            "metadata": {"origin": "Brazil"},
            "availableStock": 12,
            "reservedStock": 2
        }))
        .unwrap();

        assert_eq!(product.sku, "KAHVE-01");
        assert!((product.price - 149.90).abs() < f64::EPSILON);
        assert_eq!(product.is_active, Some(true));
        assert!(product.created_at.is_some());
        assert!(product.in_stock());
    }

    #[test]
    fn test_product_minimal_fields() {
        let product: Product =
            serde_json::from_value(json!({"sku": "S", "name": "N", "price": 1})).unwrap();
        assert!(product.id.is_none());
        assert!(!product.in_stock());
    }
}
