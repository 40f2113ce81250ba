//! Saved payment methods (cards).
//!
//! Payment methods are addressed by their per-user sequence number. New
//! cards go through [`NewPaymentMethod::new`], which checks the card fields
//! locally so that an invalid card is never sent.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::HttpMethod;
use crate::error::ValidationError;
use crate::rest::client::json_body;
use crate::rest::response::{decode_json, decode_list};
use crate::rest::{ApiError, Endpoint, ShopClient};

const ALL: Endpoint = Endpoint::new(HttpMethod::Get, "/api/payments/methods");
const FIND: Endpoint = Endpoint::new(HttpMethod::Get, "/api/payments/methods/{seq}");
const CREATE: Endpoint = Endpoint::new(HttpMethod::Post, "/api/payments/methods");
const UPDATE: Endpoint = Endpoint::new(HttpMethod::Put, "/api/payments/methods/{seq}");
const DELETE: Endpoint = Endpoint::new(HttpMethod::Delete, "/api/payments/methods/{seq}");

/// Method type sent when none is chosen.
pub const DEFAULT_METHOD_TYPE: &str = "CREDIT_CARD";

/// Masked card details returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    /// Processor token standing in for the card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Name printed on the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,

    /// `MM/YY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    /// e.g. `**** **** **** 1111`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_card_number: Option<String>,

    /// Card network, e.g. `VISA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    /// When the card was tokenized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the card token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A saved payment method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Backend identifier of the method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Per-user number identifying this method in requests.
    ///
    /// Not every backend response carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u32>,

    /// User-chosen label.
    pub method_name: String,

    /// Method type, e.g. `CREDIT_CARD`.
    #[serde(default = "default_method_type")]
    pub method_type: String,

    /// Masked card details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_info: Option<CardInfo>,

    /// Whether this method is preselected at checkout.
    #[serde(default)]
    pub is_default: bool,

    /// Whether this method can still be used.
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// When the method was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the method was last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_method_type() -> String {
    DEFAULT_METHOD_TYPE.to_string()
}

const fn default_true() -> bool {
    true
}

/// A card to save, validated on construction.
///
/// Debug output masks the card number and CVV.
///
/// # Example
///
/// ```rust
/// use eshop_client::rest::resources::NewPaymentMethod;
/// use eshop_client::ValidationError;
///
/// let card = NewPaymentMethod::new("İş kartı", "4111 1111 1111 1111", "Ayşe Yılmaz", "12/27", "123")
///     .unwrap()
///     .set_default(true);
/// assert_eq!(card.card_number(), "4111111111111111");
///
/// assert_eq!(
///     NewPaymentMethod::new("Kart", "4111", "Ayşe Yılmaz", "12/27", "123").unwrap_err(),
///     ValidationError::InvalidCardNumber
/// );
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentMethod {
    method_name: String,
    method_type: String,
    card_number: String,
    cardholder_name: String,
    expiry_date: String,
    cvv: String,
    is_default: bool,
}

impl NewPaymentMethod {
    /// Validates card form input.
    ///
    /// Spaces in the card number are removed; other fields are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for the first blank field, then
    /// checks, in order: card number (13 to 19 digits), cardholder name
    /// (letters and spaces), expiry (`MM/YY`) and CVV (3 or 4 digits).
    pub fn new(
        method_name: &str,
        card_number: &str,
        cardholder_name: &str,
        expiry_date: &str,
        cvv: &str,
    ) -> Result<Self, ValidationError> {
        let method_name = method_name.trim();
        let card_number: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
        let cardholder_name = cardholder_name.trim();
        let expiry_date = expiry_date.trim();
        let cvv = cvv.trim();

        let fields = [
            ("methodName", method_name),
            ("cardNumber", card_number.as_str()),
            ("cardholderName", cardholder_name),
            ("expiryDate", expiry_date),
            ("cvv", cvv),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(ValidationError::Empty { field });
            }
        }

        if !is_digits(&card_number, 13, 19) {
            return Err(ValidationError::InvalidCardNumber);
        }
        if !cardholder_name
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
        {
            return Err(ValidationError::InvalidCardholderName);
        }
        if !is_valid_expiry(expiry_date) {
            return Err(ValidationError::InvalidExpiryDate {
                value: expiry_date.to_string(),
            });
        }
        if !is_digits(cvv, 3, 4) {
            return Err(ValidationError::InvalidCvv);
        }

        Ok(Self {
            method_name: method_name.to_string(),
            method_type: default_method_type(),
            card_number,
            cardholder_name: cardholder_name.to_string(),
            expiry_date: expiry_date.to_string(),
            cvv: cvv.to_string(),
            is_default: false,
        })
    }

    /// Marks the method as the user's default.
    #[must_use]
    pub fn set_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Overrides the method type. Blank input keeps `CREDIT_CARD`.
    #[must_use]
    pub fn with_method_type(mut self, method_type: &str) -> Self {
        let method_type = method_type.trim();
        if !method_type.is_empty() {
            self.method_type = method_type.to_string();
        }
        self
    }

    /// Returns the label.
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Returns the method type.
    #[must_use]
    pub fn method_type(&self) -> &str {
        &self.method_type
    }

    /// Returns the card number, digits only.
    #[must_use]
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Returns the trimmed cardholder name.
    #[must_use]
    pub fn cardholder_name(&self) -> &str {
        &self.cardholder_name
    }

    /// Returns the expiry as `MM/YY`.
    #[must_use]
    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    /// Returns `true` if the method will become the default.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }
}

impl fmt::Debug for NewPaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_four = &self.card_number[self.card_number.len().saturating_sub(4)..];
        f.debug_struct("NewPaymentMethod")
            .field("method_name", &self.method_name)
            .field("method_type", &self.method_type)
            .field("card_number", &format!("****{last_four}"))
            .field("cardholder_name", &self.cardholder_name)
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .field("is_default", &self.is_default)
            .finish()
    }
}

/// Changes to a saved payment method: `{methodName, isDefault}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodUpdate {
    /// New label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,

    /// New default flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

fn is_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_valid_expiry(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    is_digits(month, 2, 2)
        && is_digits(year, 2, 2)
        && month.parse::<u8>().is_ok_and(|m| (1..=12).contains(&m))
}

impl ShopClient {
    /// Lists the user's saved payment methods.
    ///
    /// Accepts both a bare list and the `{paymentMethods: [...]}` envelope.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is neither shape.
    pub async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>, ApiError> {
        let response = self.send(ALL.request(&[]).build()?).await?;
        decode_list(&response, "paymentMethods")
    }

    /// Fetches one saved payment method.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] with status 404 if there is no such method.
    pub async fn get_payment_method(&self, sequence_number: u32) -> Result<PaymentMethod, ApiError> {
        let request = FIND.request(&[("seq", &sequence_number)]).build()?;
        let response = self.send(request).await?;
        decode_json(&response)
    }

    /// Saves a new card.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] of kind `Client` if the backend rejects the
    /// card (e.g. a duplicate method name).
    pub async fn add_payment_method(
        &self,
        method: &NewPaymentMethod,
    ) -> Result<PaymentMethod, ApiError> {
        let request = CREATE.request(&[]).body(json_body(method)?).build()?;
        let response = self.send(request).await?;
        decode_json(&response)
    }

    /// Renames a payment method or changes its default flag.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the method does not exist or the request fails.
    pub async fn update_payment_method(
        &self,
        sequence_number: u32,
        update: &PaymentMethodUpdate,
    ) -> Result<PaymentMethod, ApiError> {
        let request = UPDATE
            .request(&[("seq", &sequence_number)])
            .body(json_body(update)?)
            .build()?;
        let response = self.send(request).await?;
        decode_json(&response)
    }

    /// Deletes a saved payment method.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the method does not exist or the request fails.
    pub async fn delete_payment_method(&self, sequence_number: u32) -> Result<(), ApiError> {
        let request = DELETE.request(&[("seq", &sequence_number)]).build()?;
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> NewPaymentMethod {
        NewPaymentMethod::new("Kart", "4111 1111 1111 1111", "Çağrı Öztürk", "09/28", "123")
            .unwrap()
    }

    #[test]
    fn test_valid_card_is_accepted_with_turkish_name() {
        let card = valid();
        assert_eq!(card.card_number(), "4111111111111111");
        assert_eq!(card.cardholder_name(), "Çağrı Öztürk");
        assert_eq!(card.method_type(), DEFAULT_METHOD_TYPE);
        assert!(!card.is_default());
    }

    #[test]
    fn test_blank_fields_are_reported_by_name() {
        assert_eq!(
            NewPaymentMethod::new(" ", "4111111111111111", "A", "01/30", "123").unwrap_err(),
            ValidationError::Empty { field: "methodName" }
        );
        assert_eq!(
            NewPaymentMethod::new("Kart", "4111111111111111", "A", "01/30", "").unwrap_err(),
            ValidationError::Empty { field: "cvv" }
        );
    }

    #[test]
    fn test_card_number_length_and_digits() {
        for number in ["411111111111", "41111111111111111111", "4111-1111-1111-1111"] {
            assert_eq!(
                NewPaymentMethod::new("Kart", number, "Ali", "01/30", "123").unwrap_err(),
                ValidationError::InvalidCardNumber,
                "{number}"
            );
        }
    }

    #[test]
    fn test_cardholder_name_letters_only() {
        assert_eq!(
            NewPaymentMethod::new("Kart", "4111111111111111", "Ali 2", "01/30", "123").unwrap_err(),
            ValidationError::InvalidCardholderName
        );
    }

    #[test]
    fn test_expiry_format() {
        for expiry in ["13/30", "1/30", "00/30", "0130", "01/2030"] {
            assert!(matches!(
                NewPaymentMethod::new("Kart", "4111111111111111", "Ali", expiry, "123"),
                Err(ValidationError::InvalidExpiryDate { .. })
            ));
        }
    }

    #[test]
    fn test_cvv_length_and_digits() {
        for cvv in ["12", "12345", "12a"] {
            assert_eq!(
                NewPaymentMethod::new("Kart", "4111111111111111", "Ali", "01/30", cvv).unwrap_err(),
                ValidationError::InvalidCvv
            );
        }
        assert!(NewPaymentMethod::new("Kart", "4111111111111111", "Ali", "01/30", "1234").is_ok());
    }

    #[test]
    fn test_debug_masks_card_number_and_cvv() {
        let debug = format!("{:?}", valid());
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("****1111"));
        assert!(!debug.contains("\"123\""));
    }

    #[test]
    fn test_request_body_shape() {
        let body = json_body(&valid().set_default(true)).unwrap();
        assert_eq!(
            body,
            json!({
                "methodName": "Kart",
                "methodType": "CREDIT_CARD",
                "cardNumber": "4111111111111111",
                "cardholderName": "Çağrı Öztürk",
                "expiryDate": "09/28",
                "cvv": "123",
                "isDefault": true
            })
        );
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = PaymentMethodUpdate {
            is_default: Some(true),
            ..Default::default()
        };
        assert_eq!(json_body(&update).unwrap(), json!({"isDefault": true}));
    }

    #[test]
    fn test_payment_method_deserialization() {
        let method: PaymentMethod = serde_json::from_value(json!({
            "id": "3b3b3b3b-1111-4222-8333-444455556666",
            "sequenceNumber": 2,
            "methodName": "İş kartı",
            "methodType": "CREDIT_CARD",
            "cardInfo": {
                "maskedCardNumber": "**** **** **** 1111",
                "cardType": "VISA",
                "expiryDate": "12/27",
                "cardholderName": "AYSE YILMAZ"
            },
            "isDefault": true,
            "isActive": true
        }))
        .unwrap();

        assert_eq!(method.sequence_number, Some(2));
        assert!(method.is_default);
        assert_eq!(
            method.card_info.unwrap().masked_card_number.as_deref(),
            Some("**** **** **** 1111")
        );
    }

    #[test]
    fn test_payment_method_without_sequence_number() {
        let method: PaymentMethod = serde_json::from_value(json!({
            "id": "3b3b3b3b-1111-4222-8333-444455556666",
            "methodName": "Kart",
            "methodType": "CREDIT_CARD",
            "cardInfo": null,
            "isDefault": false,
            "isActive": true,
            "createdAt": "2024-06-01T10:00:00Z",
            "updatedAt": "2024-06-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(method.sequence_number, None);
        assert!(method.card_info.is_none());
        assert!(method.created_at.is_some());
    }
}
