//! Payments against orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::HttpMethod;
use crate::rest::client::json_body;
use crate::rest::response::{decode_json, decode_list};
use crate::rest::{ApiError, Endpoint, ShopClient};

const INITIATE: Endpoint = Endpoint::new(HttpMethod::Post, "/api/payments/initiate");
const BY_ORDER: Endpoint = Endpoint::new(HttpMethod::Get, "/api/payments/orders/{id}");
const HISTORY: Endpoint = Endpoint::new(HttpMethod::Get, "/api/payments/history");

/// Payment state of an order or payment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Nothing paid yet.
    #[default]
    None,
    /// Card verified and amount reserved.
    Authorized,
    /// Amount collected.
    Captured,
    /// Amount returned.
    Refunded,
    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

/// A payment transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Backend identifier.
    pub id: Uuid,

    /// Order being paid.
    pub order_id: Uuid,

    /// Paying user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    /// Payment method used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<Uuid>,

    /// Charged amount.
    #[serde(default)]
    pub amount: f64,

    /// ISO currency code, e.g. `TRY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Payment state.
    #[serde(default)]
    pub status: PaymentStatus,

    /// Processor transaction reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Issuer authorization code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,

    /// Processor response code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,

    /// Processor response text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,

    /// When the payment started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the payment completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// When the payment failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<DateTime<Utc>>,

    /// When the payment was refunded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunded_at: Option<DateTime<Utc>>,

    /// Amount refunded, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentInitiation {
    order_id: Uuid,
    sequence_number: u32,
}

impl ShopClient {
    /// Starts payment of `order_id` with the saved method `sequence_number`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the order or payment method is unknown or
    /// the processor declines.
    pub async fn initiate_payment(
        &self,
        order_id: Uuid,
        sequence_number: u32,
    ) -> Result<Payment, ApiError> {
        let body = json_body(&PaymentInitiation {
            order_id,
            sequence_number,
        })?;
        let response = self.send(INITIATE.request(&[]).body(body).build()?).await?;
        decode_json(&response)
    }

    /// Lists the payments made against one order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is not a
    /// payment list.
    pub async fn get_order_payments(&self, order_id: Uuid) -> Result<Vec<Payment>, ApiError> {
        let request = BY_ORDER.request(&[("id", &order_id)]).build()?;
        let response = self.send(request).await?;
        decode_list(&response, "payments")
    }

    /// Lists all of the user's payments.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is not a
    /// payment list.
    pub async fn get_payment_history(&self) -> Result<Vec<Payment>, ApiError> {
        let response = self.send(HISTORY.request(&[]).build()?).await?;
        decode_list(&response, "payments")
    }
}
