//! Bearer token storage and the login redirect hook.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Where the session's bearer token is kept.
pub trait TokenStore: Send + Sync {
    /// Current token, if signed in.
    fn token(&self) -> Option<String>;

    /// Replace the token.
    fn set_token(&self, token: String);

    /// Discard the token (sign out or session rejected).
    fn clear(&self);
}

/// Process-local token store.
///
/// # Examples
///
/// ```
/// use pagecast_interface::{MemoryTokenStore, TokenStore};
///
/// let store = MemoryTokenStore::with_token("abc");
/// assert_eq!(store.token().as_deref(), Some("abc"));
/// store.clear();
/// assert!(store.token().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl MemoryTokenStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set_token(&self, token: String) {
        *self.token.write() = Some(token);
    }

    fn clear(&self) {
        debug!("Discarding session token");
        *self.token.write() = None;
    }
}

/// Called after the service rejected the session (HTTP 401).
pub trait LoginRedirect: Send + Sync {
    /// Send the user to `login_url`.
    fn redirect(&self, login_url: &str);
}

/// Redirect hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect(&self, _login_url: &str) {}
}
