//! The request gateway.
//!
//! [`HttpClient`] is the only component that touches the network. It builds
//! the full URL, merges headers, injects the bearer credential from the
//! [`TokenStore`] and returns the raw [`HttpResponse`]. It never interprets
//! status codes and never writes to the token store.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::auth::TokenStore;
use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::{BaseUrl, ClientConfig};

/// Crate version reported in the `User-Agent` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Async HTTP gateway to the storefront API.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Concurrent requests share only the token
/// store, which they read once per request.
///
/// # Example
///
/// ```rust
/// use eshop_client::{BaseUrl, ClientConfig, TokenStore};
/// use eshop_client::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://shop.example.com").unwrap())
///     .build()
///     .unwrap();
/// let tokens = TokenStore::in_memory();
/// tokens.save("tok123");
///
/// let client = HttpClient::new(&config, tokens).unwrap();
/// let request = HttpRequest::builder(HttpMethod::Get, "/api/cart").build().unwrap();
///
/// let headers = client.resolve_headers(&request);
/// assert_eq!(headers.get("Authorization"), Some(&"Bearer tok123".to_string()));
/// assert_eq!(headers.get("Content-Type"), Some(&"application/json".to_string()));
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: BaseUrl,
    default_headers: HashMap<String, String>,
    tokens: TokenStore,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a gateway for `config`, reading credentials from `tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientInit`] if the underlying reqwest client
    /// cannot be created (e.g. TLS backend initialization failure).
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}eshop-client v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);
        for (name, value) in config.default_headers() {
            merge_header(&mut default_headers, name, value);
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(HttpError::ClientInit)?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            tokens,
        })
    }

    /// Returns the backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the headers sent with every request, before credential
    /// injection and per-request overrides.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session context this gateway reads credentials from.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Computes the final header set for `request`.
    ///
    /// Order of precedence, lowest first: client defaults, the
    /// `Authorization: Bearer` header (only when a credential is stored),
    /// then the request's own headers. Names are compared case-insensitively.
    #[must_use]
    pub fn resolve_headers(&self, request: &HttpRequest) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();

        if let Some(token) = self.tokens.get() {
            merge_header(&mut headers, "Authorization", &format!("Bearer {token}"));
        }

        if let Some(extra) = &request.extra_headers {
            for (name, value) in extra {
                merge_header(&mut headers, name, value);
            }
        }

        headers
    }

    /// Sends `request` and returns the raw response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful return.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the request fails validation
    /// or carries an unrepresentable header, and [`HttpError::Network`] if the
    /// transport fails or the body cannot be read.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);
        let headers = Self::to_header_map(&self.resolve_headers(&request))?;

        let mut req_builder = self
            .client
            .request(request.http_method.into(), &url)
            .headers(headers);

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!("Sending {} request to {}", request.http_method, request.path);

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        tracing::debug!(
            "Received status {} for {} {}",
            code,
            request.http_method,
            request.path
        );

        Ok(HttpResponse::new(code, res_headers, body))
    }

    fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, HttpError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let invalid = || InvalidHttpRequestError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Inserts `name: value`, replacing any header whose name differs only in case.
fn merge_header(headers: &mut HashMap<String, String>, name: &str, value: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;

    fn create_test_config() -> ClientConfig {
        ClientConfig::builder()
            .base_url(BaseUrl::new("https://shop.example.com").unwrap())
            .build()
            .unwrap()
    }

    fn get(path: &str) -> HttpRequest {
        HttpRequest::builder(HttpMethod::Get, path).build().unwrap()
    }

    #[test]
    fn test_client_construction_with_config() {
        let client = HttpClient::new(&create_test_config(), TokenStore::in_memory()).unwrap();
        assert_eq!(client.base_url().as_ref(), "https://shop.example.com");
    }

    #[test]
    fn test_default_headers_include_json_content_type() {
        let client = HttpClient::new(&create_test_config(), TokenStore::in_memory()).unwrap();

        assert_eq!(
            client.default_headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config(), TokenStore::in_memory()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("eshop-client v"));
        assert!(user_agent.ends_with(SDK_VERSION));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .base_url(BaseUrl::new("https://shop.example.com").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config, TokenStore::in_memory()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("eshop-client"));
    }

    #[test]
    fn test_bearer_header_injected_when_token_stored() {
        let tokens = TokenStore::in_memory();
        tokens.save("tok123");
        let client = HttpClient::new(&create_test_config(), tokens).unwrap();

        let headers = client.resolve_headers(&get("/api/cart"));
        assert_eq!(
            headers.get("Authorization"),
            Some(&"Bearer tok123".to_string())
        );
    }

    #[test]
    fn test_no_authorization_header_without_token() {
        let client = HttpClient::new(&create_test_config(), TokenStore::in_memory()).unwrap();

        let headers = client.resolve_headers(&get("/api/products"));
        assert!(!headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("authorization")));
    }

    #[test]
    fn test_token_is_read_per_request() {
        let tokens = TokenStore::in_memory();
        let client = HttpClient::new(&create_test_config(), tokens.clone()).unwrap();
        let request = get("/api/cart");

        assert!(!client.resolve_headers(&request).contains_key("Authorization"));
        tokens.save("later");
        assert_eq!(
            client.resolve_headers(&request).get("Authorization"),
            Some(&"Bearer later".to_string())
        );
    }

    #[test]
    fn test_request_headers_override_defaults_case_insensitively() {
        let client = HttpClient::new(&create_test_config(), TokenStore::in_memory()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/api/cart/count")
            .header("content-type", "text/plain")
            .build()
            .unwrap();

        let headers = client.resolve_headers(&request);
        assert_eq!(headers.get("content-type"), Some(&"text/plain".to_string()));
        assert!(!headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_config_default_headers_are_merged() {
        let config = ClientConfig::builder()
            .base_url(BaseUrl::new("https://shop.example.com").unwrap())
            .default_header("Accept-Language", "tr-TR")
            .build()
            .unwrap();
        let client = HttpClient::new(&config, TokenStore::in_memory()).unwrap();

        assert_eq!(
            client.default_headers().get("Accept-Language"),
            Some(&"tr-TR".to_string())
        );
    }

    #[test]
    fn test_to_header_map_rejects_invalid_value() {
        let mut headers = HashMap::new();
        headers.insert("X-Bad".to_string(), "line\nbreak".to_string());

        let result = HttpClient::to_header_map(&headers);
        assert!(matches!(
            result,
            Err(HttpError::InvalidRequest(InvalidHttpRequestError::InvalidHeader { name })) if name == "X-Bad"
        ));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
