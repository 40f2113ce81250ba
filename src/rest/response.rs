//! Body decoders for successful responses.
//!
//! Each operation declares one response schema: a token, a JSON record or
//! list, a plain-text number, or nothing. These helpers turn a 2xx
//! [`HttpResponse`] into that shape, or into an [`ApiError`] of kind
//! [`Decode`](crate::rest::ApiErrorKind::Decode).

use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::HttpResponse;
use crate::rest::ApiError;

/// Decodes an authentication token.
///
/// Accepts a plain-text body, a JSON string, or an object with a `token`
/// string field. Surrounding whitespace is trimmed in every form.
///
/// # Errors
///
/// Returns a decode error for an empty body, a JSON value without a token,
/// or a token that cannot be sent back in an `Authorization` header.
pub fn decode_token(response: &HttpResponse) -> Result<String, ApiError> {
    let body = response.text().trim();
    if body.is_empty() {
        return Err(ApiError::decode(response.code, "empty token"));
    }

    let token = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(token)) => token,
        Ok(Value::Object(mut map)) => match map.remove("token") {
            Some(Value::String(token)) => token,
            _ => return Err(ApiError::decode(response.code, "missing token field")),
        },
        Ok(_) if body.starts_with(['{', '[', '"']) => {
            return Err(ApiError::decode(response.code, "token is not a string"));
        }
        _ => body.to_string(),
    };

    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::decode(response.code, "empty token"));
    }
    if HeaderValue::from_str(&format!("Bearer {token}")).is_err() {
        return Err(ApiError::decode(
            response.code,
            "token contains characters not allowed in a header",
        ));
    }
    Ok(token.to_string())
}

/// Decodes a JSON body into `T`.
///
/// # Errors
///
/// Returns a decode error if the body is not valid JSON for `T`.
pub fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    response
        .json()
        .map_err(|e| ApiError::decode(response.code, e))
}

/// Decodes a JSON body that may be empty.
///
/// # Errors
///
/// Returns a decode error if a non-empty body is not valid JSON for `T`.
pub fn decode_optional_json<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<Option<T>, ApiError> {
    if response.text().trim().is_empty() {
        return Ok(None);
    }
    decode_json(response).map(Some)
}

/// Decodes a list sent either bare or wrapped as `{"<field>": [...]}`.
///
/// # Errors
///
/// Returns a decode error if the body is neither shape.
pub fn decode_list<T: DeserializeOwned>(
    response: &HttpResponse,
    envelope_field: &str,
) -> Result<Vec<T>, ApiError> {
    let value: Value = decode_json(response)?;
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove(envelope_field)
            .ok_or_else(|| ApiError::decode(response.code, format!("missing `{envelope_field}`")))?,
        other => {
            return Err(ApiError::decode(
                response.code,
                format!("expected a list, got {other}"),
            ))
        }
    };
    serde_json::from_value(items).map_err(|e| ApiError::decode(response.code, e))
}

/// Decodes a plain-text non-negative integer, yielding 0 on any parse failure.
#[must_use]
pub fn decode_count(response: &HttpResponse) -> u32 {
    response.text().trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse::new(200, HashMap::new(), body.to_string())
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    #[test]
    fn test_decode_token_plain_text() {
        assert_eq!(decode_token(&ok("tok123")).unwrap(), "tok123");
        assert_eq!(decode_token(&ok("  tok123\n")).unwrap(), "tok123");
    }

    #[test]
    fn test_decode_token_json_forms() {
        assert_eq!(decode_token(&ok(r#""tok123""#)).unwrap(), "tok123");
        assert_eq!(
            decode_token(&ok(r#"{"token":"tok123","email":"a@b.com"}"#)).unwrap(),
            "tok123"
        );
    }

    #[test]
    fn test_decode_token_trims_json_forms() {
        assert_eq!(decode_token(&ok(r#"" tok123\n""#)).unwrap(), "tok123");
        assert_eq!(decode_token(&ok(r#"{"token":"  tok123 "}"#)).unwrap(), "tok123");
    }

    #[test]
    fn test_decode_token_rejects_tokens_unusable_as_header() {
        for body in [r#""tok\u0000123""#, r#"{"token":"tok\u0007x"}"#, r#"{"token":"   "}"#] {
            let error = decode_token(&ok(body)).unwrap_err();
            assert_eq!(error.kind(), crate::rest::ApiErrorKind::Decode, "{body}");
        }
    }

    #[test]
    fn test_decode_token_rejects_empty_and_tokenless_bodies() {
        assert!(decode_token(&ok("")).is_err());
        assert!(decode_token(&ok(r#"{"message":"ok"}"#)).is_err());
        assert!(decode_token(&ok("[1]")).is_err());
    }

    #[test]
    fn test_decode_count() {
        assert_eq!(decode_count(&ok("3")), 3);
        assert_eq!(decode_count(&ok(" 12\n")), 12);
        assert_eq!(decode_count(&ok("")), 0);
        assert_eq!(decode_count(&ok("abc")), 0);
        assert_eq!(decode_count(&ok("-1")), 0);
    }

    #[test]
    fn test_decode_list_bare_and_enveloped() {
        let bare: Vec<Item> = decode_list(&ok(r#"[{"id":1},{"id":2}]"#), "items").unwrap();
        assert_eq!(bare, vec![Item { id: 1 }, Item { id: 2 }]);

        let wrapped: Vec<Item> =
            decode_list(&ok(r#"{"items":[{"id":7}],"totalCount":1}"#), "items").unwrap();
        assert_eq!(wrapped, vec![Item { id: 7 }]);
    }

    #[test]
    fn test_decode_list_missing_envelope_field() {
        let result: Result<Vec<Item>, _> = decode_list(&ok(r#"{"other":[]}"#), "items");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_optional_json_empty_body() {
        let result: Option<Item> = decode_optional_json(&ok("")).unwrap();
        assert!(result.is_none());
        let result: Option<Item> = decode_optional_json(&ok(r#"{"id":5}"#)).unwrap();
        assert_eq!(result, Some(Item { id: 5 }));
    }

    #[test]
    fn test_decode_json_error_is_decode_kind() {
        let result: Result<Item, _> = decode_json(&ok("not json"));
        assert_eq!(
            result.unwrap_err().kind(),
            crate::rest::ApiErrorKind::Decode
        );
    }
}
