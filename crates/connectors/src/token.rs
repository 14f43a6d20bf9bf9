//! Bearer-token cache for the authenticated cricket connector.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Tokens within this buffer of expiry are treated as already expired, so a
/// request never goes out with a token about to die mid-flight.
pub const EXPIRY_BUFFER: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// In-process cache for a short-lived bearer credential.
///
/// Owned by the connector instance rather than living in module-global
/// state, so tests can construct and expire it directly. `invalidate` is
/// called on any 401 from the protected endpoint, forcing re-auth on the
/// next call.
#[derive(Debug, Default)]
pub struct BearerTokenCache {
    inner: Mutex<Option<CachedToken>>,
}

impl BearerTokenCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached token if it is still comfortably within its lifetime.
    pub fn get(&self) -> Option<String> {
        let guard = self.inner.lock().expect("token cache poisoned");
        let cached = guard.as_ref()?;
        if cached.expires_at.saturating_duration_since(Instant::now()) > EXPIRY_BUFFER {
            Some(cached.token.clone())
        } else {
            None
        }
    }

    /// Store a freshly issued token with its advertised lifetime.
    pub fn store(&self, token: impl Into<String>, expires_in: Duration) {
        self.store_until(token, Instant::now() + expires_in);
    }

    /// Store a token with an explicit expiry instant (test seam).
    pub fn store_until(&self, token: impl Into<String>, expires_at: Instant) {
        let mut guard = self.inner.lock().expect("token cache poisoned");
        *guard = Some(CachedToken {
            token: token.into(),
            expires_at,
        });
    }

    /// Drop the cached token, forcing re-authentication on the next call.
    pub fn invalidate(&self) {
        let mut guard = self.inner.lock().expect("token cache poisoned");
        *guard = None;
    }
}
