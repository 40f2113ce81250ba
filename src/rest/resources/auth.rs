//! Login, registration and logout.
//!
//! A successful login or registration stores the returned token in the
//! client's [`TokenStore`](crate::TokenStore); every later request carries it.

use crate::auth::{Credentials, Registration};
use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::client::json_body;
use crate::rest::response::decode_token;
use crate::rest::{ApiError, Endpoint, ShopClient};

const LOGIN: Endpoint = Endpoint::new(HttpMethod::Post, "/api/auth/login");
const REGISTER: Endpoint = Endpoint::new(HttpMethod::Post, "/api/auth/register");

impl ShopClient {
    /// Logs in and stores the returned token.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] of kind `Auth` for rejected credentials, or
    /// kind `Decode` if the response carries no token. The token store is
    /// unchanged on any failure other than 401.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let request = LOGIN.request(&[]).body(json_body(credentials)?).build()?;
        self.authenticate(request).await
    }

    /// Registers a new account and stores the returned token.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] of kind `Client` when the backend rejects the
    /// registration (e.g. the email is taken).
    pub async fn register(&self, registration: &Registration) -> Result<String, ApiError> {
        let request = REGISTER
            .request(&[])
            .body(json_body(registration)?)
            .build()?;
        self.authenticate(request).await
    }

    /// Removes the stored token. No request is sent.
    pub fn logout(&self) {
        self.tokens().remove();
        tracing::debug!("Logged out; stored token removed");
    }

    async fn authenticate(&self, request: HttpRequest) -> Result<String, ApiError> {
        let response = self.send(request).await?;
        let token = decode_token(&response)?;
        self.tokens().save(&token);
        Ok(token)
    }
}
