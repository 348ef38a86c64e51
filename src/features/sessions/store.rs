use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::subject::Subject;

/// Per-browser-session state.
///
/// `last_checked` starts at session creation, so only uploads made after
/// the session began can trigger a notification. Once `notified` is set
/// it stays set for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub last_checked: DateTime<Utc>,
    pub notified: bool,
    pub selected_subject: Option<Subject>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            last_checked: Utc::now(),
            notified: false,
            selected_subject: None,
        }
    }
}

struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            state: SessionState::new(),
            last_seen: Instant::now(),
        }
    }
}

/// In-memory session store keyed by the `sid` cookie.
///
/// Cheap to clone; all clones share the same map.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Resolve a presented session id to a live entry.
    ///
    /// A known id refreshes its idle timer. An unknown id (expired or
    /// fabricated) gets a fresh entry under the same id, which is
    /// indistinguishable from a brand-new session. With no id at all a
    /// new one is issued; the caller must send the cookie back.
    ///
    /// Returns the session id and whether a cookie needs to be issued.
    pub async fn resolve(&self, presented: Option<Uuid>) -> (Uuid, bool) {
        let mut sessions = self.inner.write().await;
        match presented {
            Some(id) => {
                let entry = sessions.entry(id).or_insert_with(SessionEntry::new);
                entry.last_seen = Instant::now();
                (id, false)
            }
            None => {
                let id = Uuid::new_v4();
                sessions.insert(id, SessionEntry::new());
                (id, true)
            }
        }
    }

    /// Read-modify-write a session's state under the write lock.
    ///
    /// The closure runs atomically with respect to other callers, which
    /// is what keeps the notification check-and-set race free. Missing
    /// entries (pruned between middleware and handler) are re-created.
    pub async fn update<F, R>(&self, id: Uuid, f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut sessions = self.inner.write().await;
        let entry = sessions.entry(id).or_insert_with(SessionEntry::new);
        entry.last_seen = Instant::now();
        f(&mut entry.state)
    }

    /// Drop sessions idle longer than the configured TTL. Returns how
    /// many were removed.
    pub async fn prune_idle(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < self.idle_ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_without_id_issues_new_session() {
        let store = SessionStore::new(Duration::from_secs(60));

        let (id, issued) = store.resolve(None).await;
        assert!(issued);
        assert_eq!(store.len().await, 1);

        let (same, issued_again) = store.resolve(Some(id)).await;
        assert_eq!(same, id);
        assert!(!issued_again);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_gets_fresh_state_under_same_id() {
        let store = SessionStore::new(Duration::from_secs(60));
        let stale = Uuid::new_v4();

        let (id, issued) = store.resolve(Some(stale)).await;
        assert_eq!(id, stale);
        assert!(!issued);

        let state = store.update(id, |s| s.clone()).await;
        assert!(!state.notified);
        assert!(state.selected_subject.is_none());
    }

    #[tokio::test]
    async fn test_update_persists_state() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, _) = store.resolve(None).await;

        store
            .update(id, |s| s.selected_subject = Some(Subject::Chemistry))
            .await;

        let state = store.update(id, |s| s.clone()).await;
        assert_eq!(state.selected_subject, Some(Subject::Chemistry));
    }

    #[tokio::test]
    async fn test_prune_removes_idle_sessions() {
        let store = SessionStore::new(Duration::from_millis(20));
        let (kept, _) = store.resolve(None).await;
        let (_expired, _) = store.resolve(None).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        // Touch one session so only the other is idle past the TTL
        store.update(kept, |_| ()).await;

        let removed = store.prune_idle().await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
    }
}
