// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential storage shared by the client pipeline and the cookie layer.
//!
//! The platform issues a credential pair (access + refresh token, each with
//! its own lifetime). Exactly one pair is live at a time: writes replace the
//! whole pair, reads return whatever subset has not expired, and a clear
//! drops both. Stores are injected into [`crate::client::ApiClient`] so the
//! pipeline never reaches for hidden global state.

pub mod cookies;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// The credential pair as issued by the platform's auth endpoints.
///
/// Expiry fields are lifetimes in seconds from issuance; they drive cookie
/// `Max-Age` and the in-memory deadlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub access_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_expiry: i64,
}

/// Whatever subset of the pair a store currently holds. Missing fields are
/// absent, never defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub access_expiry: Option<i64>,
    pub refresh_expiry: Option<i64>,
}

impl StoredTokens {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }

    /// The full pair, when every field is present.
    pub fn as_pair(&self) -> Option<CredentialPair> {
        Some(CredentialPair {
            access_token: self.access_token.clone()?,
            refresh_token: self.refresh_token.clone()?,
            access_expiry: self.access_expiry?,
            refresh_expiry: self.refresh_expiry?,
        })
    }
}

/// Single source of truth for the credential pair.
pub trait TokenStore: Send + Sync {
    /// Whatever subset of the pair is currently present. Never fails.
    fn get(&self) -> StoredTokens;

    /// Replace the whole pair. Callers never observe a partial write.
    fn set(&self, pair: CredentialPair);

    /// Drop both tokens. Idempotent.
    fn clear(&self);
}

#[derive(Default)]
struct Slot {
    access_token: Option<String>,
    refresh_token: Option<String>,
    access_expiry: Option<i64>,
    refresh_expiry: Option<i64>,
    access_deadline: Option<DateTime<Utc>>,
    refresh_deadline: Option<DateTime<Utc>>,
}

/// In-memory token store with per-field expiry.
///
/// A seeded store (from request cookies) carries no deadlines of its own:
/// the cookie jar already enforced those lifetimes. Deadlines appear once a
/// fresh pair is written through [`TokenStore::set`].
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Slot>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding tokens recovered from another medium.
    pub fn seeded(tokens: StoredTokens) -> Self {
        Self {
            inner: Mutex::new(Slot {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                access_expiry: tokens.access_expiry,
                refresh_expiry: tokens.refresh_expiry,
                access_deadline: None,
                refresh_deadline: None,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> StoredTokens {
        let now = Utc::now();
        let slot = self.lock();
        let access_live = slot.access_deadline.is_none_or(|deadline| now < deadline);
        let refresh_live = slot.refresh_deadline.is_none_or(|deadline| now < deadline);
        StoredTokens {
            access_token: slot.access_token.clone().filter(|_| access_live),
            refresh_token: slot.refresh_token.clone().filter(|_| refresh_live),
            access_expiry: slot.access_expiry.filter(|_| access_live),
            refresh_expiry: slot.refresh_expiry.filter(|_| refresh_live),
        }
    }

    fn set(&self, pair: CredentialPair) {
        let now = Utc::now();
        let replacement = Slot {
            access_deadline: Some(now + Duration::seconds(pair.access_expiry)),
            refresh_deadline: Some(now + Duration::seconds(pair.refresh_expiry)),
            access_token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
            access_expiry: Some(pair.access_expiry),
            refresh_expiry: Some(pair.refresh_expiry),
        };
        *self.lock() = replacement;
    }

    fn clear(&self) {
        *self.lock() = Slot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(n: u32) -> CredentialPair {
        CredentialPair {
            access_token: format!("access-{n}"),
            refresh_token: format!("refresh-{n}"),
            access_expiry: 900,
            refresh_expiry: 604_800,
        }
    }

    #[test]
    fn test_empty_store_returns_nothing() {
        let store = MemoryTokenStore::new();
        let tokens = store.get();
        assert!(tokens.is_empty());
        assert_eq!(tokens.access_token, None);
        assert_eq!(tokens.refresh_token, None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let store = MemoryTokenStore::new();
        store.set(pair(1));
        let tokens = store.get();
        assert_eq!(tokens.access_token.as_deref(), Some("access-1"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(tokens.access_expiry, Some(900));
        assert_eq!(tokens.refresh_expiry, Some(604_800));
        assert_eq!(tokens.as_pair(), Some(pair(1)));
    }

    #[test]
    fn test_replacement_is_whole_pair() {
        let store = MemoryTokenStore::new();
        store.set(pair(1));
        store.set(pair(2));
        let tokens = store.get();
        // Never a mixture of the two pairs
        assert_eq!(tokens.access_token.as_deref(), Some("access-2"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-2"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.set(pair(1));
        store.clear();
        assert!(store.get().is_empty());
        store.clear();
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_expired_fields_are_absent() {
        let store = MemoryTokenStore::new();
        store.set(CredentialPair {
            access_token: "short".to_string(),
            refresh_token: "long".to_string(),
            access_expiry: -1,
            refresh_expiry: 3600,
        });
        let tokens = store.get();
        // The access token's own lifetime has passed; the refresh token lives on
        assert_eq!(tokens.access_token, None);
        assert_eq!(tokens.access_expiry, None);
        assert_eq!(tokens.refresh_token.as_deref(), Some("long"));
    }

    #[test]
    fn test_seeded_store_has_no_deadlines() {
        let store = MemoryTokenStore::seeded(StoredTokens {
            access_token: Some("from-cookie".to_string()),
            refresh_token: None,
            access_expiry: None,
            refresh_expiry: None,
        });
        let tokens = store.get();
        assert_eq!(tokens.access_token.as_deref(), Some("from-cookie"));
        assert_eq!(tokens.refresh_token, None);
        assert_eq!(tokens.as_pair(), None);
    }
}
