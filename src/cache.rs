//! Session token cache.
//!
//! Each [`TokenKey`] owns a slot guarded by an async mutex. A caller that
//! finds the slot empty or expired issues a new token while holding the
//! lock, so concurrent callers for the same key wait for that single
//! issuance and then reuse its result.

use crate::auth::{AccessToken, TokenKey};
use crate::error::Result;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

type Slot = Arc<Mutex<Option<AccessToken>>>;

/// Token cache owned by a client instance.
///
/// Clones share the same underlying cache. A slot is kept for every member
/// and service that has been called until its token is invalidated or the
/// cache is cleared; expired tokens are replaced in place.
#[derive(Clone, Default)]
pub struct TokenCache {
    slots: Arc<DashMap<TokenKey, Slot>>,
}

impl TokenCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &TokenKey) -> Slot {
        // The map guard must not live across an await point.
        self.slots.entry(key.clone()).or_default().clone()
    }

    /// Current token for `key`, expired or not.
    pub async fn get(&self, key: &TokenKey) -> Option<AccessToken> {
        let slot = self.slots.get(key).map(|s| s.value().clone())?;
        let guard = slot.lock().await;
        guard.clone()
    }

    /// Return the cached token for `key` if it is still valid at `now`,
    /// otherwise run `issue` and store its result.
    ///
    /// A failed issuance leaves the slot as it was.
    pub async fn get_or_issue<F, Fut>(
        &self,
        key: &TokenKey,
        now: DateTime<Utc>,
        issue: F,
    ) -> Result<AccessToken>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken>>,
    {
        let slot = self.slot(key);
        let mut guard = slot.lock().await;

        if let Some(token) = guard.as_ref() {
            if !token.is_expired(now) {
                return Ok(token.clone());
            }
            debug!(access_id = %key.access_id, scope = %key.scope, "cached token expired");
        }

        let token = issue().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token for `key` if it is still `rejected`.
    ///
    /// A token stored by a concurrent refresh is left in place. The slot itself
    /// is removed once no other caller holds it, so keys that stop being used
    /// do not stay in the map. Returns true if a token was removed.
    pub async fn invalidate(&self, key: &TokenKey, rejected: &AccessToken) -> bool {
        let Some(slot) = self.slots.get(key).map(|s| s.value().clone()) else {
            return false;
        };
        let removed = {
            let mut guard = slot.lock().await;
            if guard.as_ref().is_some_and(|t| t.value == rejected.value) {
                *guard = None;
                true
            } else {
                false
            }
        };
        drop(slot);

        if removed {
            // Only the map holds the slot: nobody is waiting on it.
            self.slots
                .remove_if(key, |_, slot| Arc::strong_count(slot) == 1);
        }
        removed
    }

    /// Remove every cached token.
    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Number of keys with a slot.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no key has a slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
