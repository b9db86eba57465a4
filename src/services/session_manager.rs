// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Bot,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub messages: Vec<Message>,
    pub last_active: Instant,
    /// True while a hybrid resolution for this session is outstanding.
    /// Overlapping submissions are rejected, not queued. Atomic so the
    /// [`ResolutionGuard`] can release it from `Drop` without a lock.
    in_flight: Arc<AtomicBool>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            last_active: Instant::now(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Exclusive permission to run one resolution for a session. Released on
/// drop, so a cancelled request (axum drops the handler future when the
/// client disconnects) can never leave the session stuck rejecting
/// submissions until the TTL purge.
#[derive(Debug)]
pub struct ResolutionGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    // Create a fresh session and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone());

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        id
    }

    // Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        let session = Session::new(id.to_string());
        guard.insert(id.to_string(), session);
        id.to_string()
    }

    // Append a message to a session's history and touch last_active.
    pub async fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: impl Into<String>,
    ) -> usize {
        let mut guard = self.inner.write().await;
        let entry = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id.to_string()));
        let msg = Message {
            role,
            content: content.into(),
            timestamp: Instant::now(),
        };
        entry.messages.push(msg);
        entry.last_active = Instant::now();
        entry.messages.len()
    }

    /// Get a copy of the session history
    pub async fn get_history(&self, session_id: &str) -> Option<Vec<Message>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.messages.clone())
    }

    /// Mark a resolution as in flight. Returns `None` if the session does
    /// not exist or already has one outstanding, in which case the caller
    /// must reject the submission. The flag clears when the returned guard
    /// drops, completed or cancelled alike.
    pub async fn begin_resolution(&self, session_id: &str) -> Option<ResolutionGuard> {
        let guard = self.inner.read().await;
        let session = guard.get(session_id)?;
        session
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(ResolutionGuard {
            flag: Arc::clone(&session.in_flight),
        })
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// List session ids
    pub async fn list_session_ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn basic_session_flow() {
        let mgr = SessionManager::new(Duration::from_secs(60));
        let sid = mgr.create_session().await;
        assert!(!sid.is_empty());
        let len = mgr.append_message(&sid, MessageRole::User, "hello").await;
        assert_eq!(len, 1);
        let history = mgr.get_history(&sid).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(mgr.remove_session(&sid).await);
    }
}
