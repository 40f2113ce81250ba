//! Session state and authentication input for the storefront client.
//!
//! # Overview
//!
//! - [`TokenStore`]: the session context holding the single bearer credential
//! - [`KeyValueStore`]: the persistence seam under the token store, with
//!   [`MemoryStore`] and [`FileStore`] implementations
//! - [`TokenClaims`]: unverified display data decoded from the credential
//! - [`Credentials`] and [`Registration`]: validated login/register input
//!
//! # Example
//!
//! ```rust
//! use eshop_client::auth::{Credentials, TokenStore};
//!
//! // Created once at startup, then injected into the client
//! let tokens = TokenStore::in_memory();
//!
//! // Form input is validated before any request exists
//! let credentials = Credentials::new("a@b.com", "secret1").unwrap();
//! assert_eq!(credentials.email.as_ref(), "a@b.com");
//! assert!(!tokens.is_authenticated());
//! ```

mod claims;
mod credentials;
mod storage;
mod token_store;

pub use claims::TokenClaims;
pub use credentials::{Credentials, Email, Password, Registration, MIN_PASSWORD_LENGTH};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use token_store::{TokenStore, TOKEN_KEY};
