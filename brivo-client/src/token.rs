//! Bearer token cache
//!
//! The password grant returns a token with an `expires_in` lifetime. The
//! cache hands the token out until `skew` before it expires, after which the
//! next caller re-authenticates. The lock is held across the refresh so
//! concurrent callers share one token request.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

use crate::types::AccessToken;

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Token cache shared between clones of a [`crate::BrivoClient`]
#[derive(Clone)]
pub struct TokenCache {
    slot: Arc<Mutex<Option<CachedToken>>>,
    skew: Duration,
}

/// Exclusive view of the cache while a caller checks or refreshes the token
pub struct TokenSlot<'a> {
    guard: MutexGuard<'a, Option<CachedToken>>,
    skew: Duration,
}

impl TokenCache {
    pub fn new(skew: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            skew,
        }
    }

    /// Lock the cache
    pub async fn lock(&self) -> TokenSlot<'_> {
        TokenSlot {
            guard: self.slot.lock().await,
            skew: self.skew,
        }
    }

    /// Drop the cached token (e.g. after the API answered 401)
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }

    /// Whether a usable token is cached right now
    pub async fn is_warm(&self) -> bool {
        self.lock().await.valid().is_some()
    }
}

impl TokenSlot<'_> {
    /// The cached token, if it is not within `skew` of expiring
    pub fn valid(&self) -> Option<String> {
        self.guard
            .as_ref()
            .filter(|t| {
                Instant::now()
                    .checked_add(self.skew)
                    .is_some_and(|limit| t.expires_at > limit)
            })
            .map(|t| t.access_token.clone())
    }

    /// Remember a freshly issued token
    ///
    /// A lifetime too large to represent as an `Instant` is not cached.
    pub fn store(&mut self, token: &AccessToken) {
        *self.guard = token
            .expires_in
            .and_then(|secs| Instant::now().checked_add(Duration::from_secs(secs)))
            .map(|expires_at| CachedToken {
                access_token: token.access_token.clone(),
                expires_at,
            });
    }
}
