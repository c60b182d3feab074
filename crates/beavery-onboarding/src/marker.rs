//! The short-lived "just verified" marker kept in session storage.
//!
//! It is written when a freshly verified user still has to pick a name, and
//! gates re-entering the name step without going through verification again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

pub const VERIFIED_KEY: &str = "otp_verified";
pub const VERIFIED_AT_KEY: &str = "otp_verified_at";

/// How long a marker stays valid, in milliseconds.
pub const MARKER_TTL_MS: i64 = 5 * 60 * 1000;

/// Per-tab key/value storage.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);
}

impl<T: SessionStore> SessionStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
    fn clear(&self) {
        (**self).clear()
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values().remove(key);
    }

    fn clear(&self) {
        self.values().clear();
    }
}

pub fn mark_verified(store: &impl SessionStore, now_ms: i64) {
    store.set(VERIFIED_KEY, "true");
    store.set(VERIFIED_AT_KEY, &now_ms.to_string());
}

/// True if a marker exists and is at most [`MARKER_TTL_MS`] old.
pub fn is_fresh(store: &impl SessionStore, now_ms: i64) -> bool {
    if store.get(VERIFIED_KEY).as_deref() != Some("true") {
        return false;
    }
    let Some(at) = store
        .get(VERIFIED_AT_KEY)
        .and_then(|v| v.parse::<i64>().ok())
    else {
        return false;
    };
    (0..=MARKER_TTL_MS).contains(&(now_ms - at))
}

pub fn clear_marker(store: &impl SessionStore) {
    store.remove(VERIFIED_KEY);
    store.remove(VERIFIED_AT_KEY);
}
