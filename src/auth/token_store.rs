//! The session context holding the bearer credential.
//!
//! A [`TokenStore`] wraps a [`KeyValueStore`] and reserves a single key,
//! [`TOKEN_KEY`], for the bearer token. It is created once at application
//! start and handed to the HTTP client; clones share the same underlying
//! store, so a 401 observed by any request is visible to all of them.
//!
//! Presence of a token is the only notion of "authenticated" on the client.
//! No format, signature or expiry check is performed.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::claims::TokenClaims;
use super::storage::{FileStore, KeyValueStore, MemoryStore};

/// The storage key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "jwt_token";

/// Shared handle to the single stored bearer credential.
///
/// # Example
///
/// ```rust
/// use eshop_client::TokenStore;
///
/// let tokens = TokenStore::in_memory();
/// assert!(!tokens.is_authenticated());
///
/// tokens.save("tok123");
/// assert_eq!(tokens.get().as_deref(), Some("tok123"));
/// assert!(tokens.is_authenticated());
///
/// tokens.remove();
/// assert!(tokens.get().is_none());
/// ```
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    /// Creates a token store over an arbitrary key-value store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Creates a token store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Creates a token store persisted to a JSON file at `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::open(path)))
    }

    /// Returns the stored credential, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// Persists `token`, overwriting any previous credential.
    pub fn save(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    /// Deletes the stored credential.
    pub fn remove(&self) {
        self.store.remove(TOKEN_KEY);
    }

    /// Returns `true` if a credential is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Decodes the stored credential's payload for display purposes.
    ///
    /// Returns `None` when no credential is stored or it is not a JWT.
    #[must_use]
    pub fn claims(&self) -> Option<TokenClaims> {
        self.get().and_then(|token| TokenClaims::decode(&token))
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_authenticated() {
            f.write_str("TokenStore(*****)")
        } else {
            f.write_str("TokenStore(empty)")
        }
    }
}

// Verify TokenStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenStore>();
};
