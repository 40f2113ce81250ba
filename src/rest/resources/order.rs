//! Orders: checkout, listing, lookup and cancellation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::clients::HttpMethod;
use crate::error::ValidationError;
use crate::rest::client::json_body;
use crate::rest::resources::{Address, PaymentStatus};
use crate::rest::response::decode_json;
use crate::rest::{ApiError, Endpoint, ShopClient};

const CHECKOUT: Endpoint = Endpoint::new(HttpMethod::Post, "/api/orders/checkout");
const ALL: Endpoint = Endpoint::new(HttpMethod::Get, "/api/orders");
const FIND: Endpoint = Endpoint::new(HttpMethod::Get, "/api/orders/{id}");
const CANCEL: Endpoint = Endpoint::new(HttpMethod::Post, "/api/orders/{id}/cancel");

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created, awaiting payment.
    #[default]
    Pending,
    /// Payment completed.
    Paid,
    /// Payment failed.
    Failed,
    /// Cancelled by the user or the shop.
    Cancelled,
    /// Handed to the carrier.
    Shipped,
    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns `true` while the order can still be cancelled.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Paid)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend identifier.
    pub id: Uuid,

    /// Human-facing order number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<i64>,

    /// Owner of the order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    /// Amount due.
    #[serde(default)]
    pub total_amount: f64,

    /// ISO currency code, e.g. `TRY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Lifecycle state.
    #[serde(default)]
    pub status: OrderStatus,

    /// Payment state.
    #[serde(default)]
    pub payment_status: PaymentStatus,

    /// When the order was placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When payment completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,

    /// When the order was cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,

    /// The shipping address as stored by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Value>,

    /// The billing address as stored by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Value>,

    /// Free-form metadata sent at checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Order {
    /// Parses the stored shipping address, if it has the expected shape.
    #[must_use]
    pub fn shipping(&self) -> Option<Address> {
        parse_address(self.shipping_address.as_ref())
    }

    /// Parses the stored billing address, if it has the expected shape.
    #[must_use]
    pub fn billing(&self) -> Option<Address> {
        parse_address(self.billing_address.as_ref())
    }
}

// The backend stores addresses as JSON text and may send them either way.
fn parse_address(value: Option<&Value>) -> Option<Address> {
    match value? {
        Value::String(text) => serde_json::from_str(text).ok(),
        other => serde_json::from_value(other.clone()).ok(),
    }
}

/// Checkout body: `{shippingAddress, billingAddress, sequenceNumber,
/// orderNotes, metadata}`.
///
/// # Example
///
/// ```rust
/// use eshop_client::rest::resources::{Address, CheckoutRequest};
///
/// let shipping = Address::new("İstanbul", "Beşiktaş", "Levent", "Büyükdere Cd.", "100").unwrap();
/// let checkout = CheckoutRequest::new(shipping, 1)
///     .unwrap()
///     .with_order_notes("Kapıya bırakın");
///
/// assert_eq!(checkout.sequence_number(), 1);
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    shipping_address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing_address: Option<Address>,
    sequence_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl CheckoutRequest {
    /// Starts a checkout shipping to `shipping_address` and paying with the
    /// payment method `sequence_number`. Billing defaults to shipping.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] if a required address field is blank.
    pub fn new(shipping_address: Address, sequence_number: u32) -> Result<Self, ValidationError> {
        shipping_address.validate()?;
        Ok(Self {
            shipping_address,
            billing_address: None,
            sequence_number,
            order_notes: None,
            metadata: None,
        })
    }

    /// Bills to a different address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] if a required address field is blank.
    pub fn with_billing_address(mut self, address: Address) -> Result<Self, ValidationError> {
        address.validate()?;
        self.billing_address = Some(address);
        Ok(self)
    }

    /// Attaches delivery notes. Blank notes are dropped.
    #[must_use]
    pub fn with_order_notes(mut self, notes: &str) -> Self {
        let notes = notes.trim();
        self.order_notes = (!notes.is_empty()).then(|| notes.to_string());
        self
    }

    /// Attaches free-form metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the shipping address.
    #[must_use]
    pub const fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    /// Returns the billing address, if it differs from shipping.
    #[must_use]
    pub const fn billing_address(&self) -> Option<&Address> {
        self.billing_address.as_ref()
    }

    /// Returns the payment method's sequence number.
    #[must_use]
    pub const fn sequence_number(&self) -> u32 {
        self.sequence_number
    }
}

impl ShopClient {
    /// Turns the cart into an order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] of kind `Client` if the cart is empty or the
    /// payment method is unknown.
    pub async fn checkout(&self, checkout: &CheckoutRequest) -> Result<Order, ApiError> {
        let request = CHECKOUT.request(&[]).body(json_body(checkout)?).build()?;
        let response = self.send(request).await?;
        decode_json(&response)
    }

    /// Lists the user's orders.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is not a list.
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        let response = self.send(ALL.request(&[]).build()?).await?;
        decode_json(&response)
    }

    /// Fetches one order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] with status 404 if the order does not exist.
    pub async fn get_order(&self, order_id: Uuid) -> Result<Order, ApiError> {
        let response = self.send(FIND.request(&[("id", &order_id)]).build()?).await?;
        decode_json(&response)
    }

    /// Cancels an order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] of kind `Client` if the order can no longer
    /// be cancelled.
    pub async fn cancel_order(&self, order_id: Uuid) -> Result<Order, ApiError> {
        let request = CANCEL
            .request(&[("id", &order_id)])
            .body(serde_json::json!({}))
            .build()?;
        let response = self.send(request).await?;
        decode_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shipping() -> Address {
        Address::new("Bursa", "Nilüfer", "Görükle", "Üniversite Cd.", "3").unwrap()
    }

    #[test]
    fn test_checkout_body_shape() {
        let checkout = CheckoutRequest::new(shipping(), 2)
            .unwrap()
            .with_order_notes("  ")
            .with_metadata(json!({"source": "web"}));

        let body = json_body(&checkout).unwrap();
        assert_eq!(body["sequenceNumber"], 2);
        assert_eq!(body["shippingAddress"]["buildingNo"], "3");
        assert_eq!(body["metadata"]["source"], "web");
        assert!(body.get("billingAddress").is_none());
        assert!(body.get("orderNotes").is_none());
    }

    #[test]
    fn test_checkout_rejects_incomplete_billing_address() {
        let mut billing = shipping();
        billing.street = String::new();

        let result = CheckoutRequest::new(shipping(), 1)
            .unwrap()
            .with_billing_address(billing);
        assert_eq!(result.unwrap_err(), ValidationError::Empty { field: "street" });
    }

    #[test]
    fn test_order_status_serialization() {
        assert_eq!(serde_json::to_value(OrderStatus::Cancelled).unwrap(), json!("CANCELLED"));
        let status: OrderStatus = serde_json::from_value(json!("SHIPPED")).unwrap();
        assert_eq!(status, OrderStatus::Shipped);
        let status: OrderStatus = serde_json::from_value(json!("REFUNDED")).unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }

    #[test]
    fn test_order_deserialization() {
        let order: Order = serde_json::from_value(json!({
            "id": "a1a1a1a1-b2b2-4c3c-8d4d-e5e5e5e5e5e5",
            "orderNumber": 1001,
            "totalAmount": 299.8,
            "currency": "TRY",
            "status": "PENDING",
            "paymentStatus": "NONE",
            "createdAt": "2024-06-01T10:00:00Z",
            "shippingAddress": {
                "city": "Bursa",
                "district": "Nilüfer",
                "neighborhood": "Görükle",
                "street": "Üniversite Cd.",
                "buildingNo": "3",
                "apartmentNo": null,
                "country": "Turkey"
            },
            "billingAddress": null
        }))
        .unwrap();

        assert_eq!(order.order_number, Some(1001));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::None);
        assert!(order.status.is_cancellable());
        assert_eq!(order.shipping().unwrap().city, "Bursa");
        assert!(order.billing().is_none());
    }

    #[test]
    fn test_address_sent_as_json_text() {
        let order: Order = serde_json::from_value(json!({
            "id": "a1a1a1a1-b2b2-4c3c-8d4d-e5e5e5e5e5e5",
            "totalAmount": 10.0,
            "status": "PAID",
            "billingAddress": "{\"city\":\"İzmir\",\"district\":\"Konak\",\"neighborhood\":\"Alsancak\",\"street\":\"Kıbrıs Şehitleri Cd.\",\"buildingNo\":\"8\"}"
        }))
        .unwrap();

        let billing = order.billing().unwrap();
        assert_eq!(billing.city, "İzmir");
        assert_eq!(billing.country, "Turkey");
    }
}
