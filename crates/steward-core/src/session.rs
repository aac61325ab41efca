// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session management.
//!
//! The [`SessionManager`] is a process-wide, concurrency-safe map of opaque
//! session tokens to authenticated principals. It is the only core-owned
//! mutable shared state; all other per-request data is transient.
//!
//! Expiry is lazy: an expired record is treated as absent on lookup and
//! removed in passing. No background sweep is required, but
//! [`SessionManager::purge_expired`] is available for callers that want one.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// SessionRecord
// =============================================================================

/// Server-side proof of an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque session token, referenced by the client cookie.
    pub token: String,
    /// Authenticated principal (username).
    pub principal: String,
    /// Instant after which this record is treated as absent.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Returns `true` if this record has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

// =============================================================================
// SessionManager
// =============================================================================

/// Process-wide, thread-safe session store.
///
/// Safe under concurrent `get`/`set`/`invalidate` from multiple in-flight
/// requests with no external locking by callers.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use steward_core::session::SessionManager;
///
/// let sessions = SessionManager::new();
/// let token = sessions.set("admin", Duration::minutes(30));
/// assert_eq!(sessions.get(&token).unwrap().principal, "admin");
///
/// sessions.invalidate(&token);
/// assert!(sessions.get(&token).is_none());
/// ```
#[derive(Debug, Default)]
pub struct SessionManager {
    records: DashMap<String, SessionRecord>,
}

impl SessionManager {
    /// Creates an empty session store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Mints a session for a principal, returning a fresh opaque token.
    pub fn set(&self, principal: impl Into<String>, ttl: Duration) -> String {
        let token = Uuid::new_v4().to_string();
        self.insert(token.clone(), principal, ttl);
        token
    }

    /// Stores a session under a caller-chosen token.
    pub fn insert(&self, token: impl Into<String>, principal: impl Into<String>, ttl: Duration) {
        let token = token.into();
        let record = SessionRecord {
            token: token.clone(),
            principal: principal.into(),
            expires_at: Utc::now() + ttl,
        };

        tracing::debug!(principal = %record.principal, "Session created");
        self.records.insert(token, record);
    }

    /// Looks a token up, treating expired records as absent.
    ///
    /// An expired record is removed in passing.
    pub fn get(&self, token: &str) -> Option<SessionRecord> {
        let record = {
            let guard = self.records.get(token)?;
            guard.value().clone()
        };
        if record.is_expired() {
            self.records.remove(token);
            return None;
        }
        Some(record)
    }

    /// Removes a session, if present.
    pub fn invalidate(&self, token: &str) {
        if self.records.remove(token).is_some() {
            tracing::debug!("Session invalidated");
        }
    }

    /// Removes every expired record and returns how many were dropped.
    ///
    /// Optional sweep for long-lived processes; lookups already expire
    /// lazily without it.
    pub fn purge_expired(&self) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| !record.is_expired());
        before - self.records.len()
    }

    /// Returns the number of live records, counting not-yet-purged expired
    /// ones.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let sessions = SessionManager::new();
        let token = sessions.set("admin", Duration::seconds(60));

        let record = sessions.get(&token).unwrap();
        assert_eq!(record.principal, "admin");
        assert_eq!(record.token, token);
    }

    #[test]
    fn test_expired_record_is_absent() {
        let sessions = SessionManager::new();
        let token = sessions.set("admin", Duration::seconds(-1));

        assert!(sessions.get(&token).is_none());
        // Lazy expiry removed the record.
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_insert_with_caller_token() {
        let sessions = SessionManager::new();
        sessions.insert("tok", "admin", Duration::seconds(60));

        let record = sessions.get("tok").unwrap();
        assert_eq!(record.principal, "admin");
        assert_eq!(record.token, "tok");
    }

    #[test]
    fn test_invalidate() {
        let sessions = SessionManager::new();
        let token = sessions.set("admin", Duration::minutes(5));

        sessions.invalidate(&token);
        assert!(sessions.get(&token).is_none());
    }

    #[test]
    fn test_unknown_token() {
        let sessions = SessionManager::new();
        assert!(sessions.get("no-such-token").is_none());
    }

    #[test]
    fn test_purge_expired() {
        let sessions = SessionManager::new();
        sessions.set("a", Duration::seconds(-1));
        sessions.set("b", Duration::seconds(-1));
        let live = sessions.set("c", Duration::minutes(5));

        assert_eq!(sessions.purge_expired(), 2);
        assert_eq!(sessions.len(), 1);
        assert!(sessions.get(&live).is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_set_get() {
        use std::sync::Arc;

        let sessions = Arc::new(SessionManager::new());
        let mut handles = Vec::new();

        for i in 0..100 {
            let sessions = sessions.clone();
            handles.push(tokio::spawn(async move {
                let principal = format!("user-{}", i);
                let token = sessions.set(&principal, Duration::minutes(5));
                let record = sessions.get(&token).expect("record lost under concurrency");
                assert_eq!(record.principal, principal);
                token
            }));
        }

        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap());
        }

        // Every entry survived; tokens are distinct.
        assert_eq!(sessions.len(), 100);
        let unique: std::collections::HashSet<_> = tokens.iter().collect();
        assert_eq!(unique.len(), 100);
    }
}
