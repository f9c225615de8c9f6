use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, trace};
use uuid::Uuid;

/// A login session opened by a successful login
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: i32,
    pub opened_at: DateTime<Utc>,
}

/// Registry of live login sessions.
///
/// Entries expire together with the refresh tokens issued for them, and are
/// removed eagerly on logout. The cache is unbounded: evicting a live entry
/// would log its user out.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Cache<String, SessionRecord>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let sessions = Cache::builder().time_to_live(ttl).build();
        Self { sessions }
    }

    /// Open a new session for `user_id` and return its id
    pub async fn open(&self, user_id: i32) -> String {
        let session_id = Uuid::new_v4().to_string();
        let record = SessionRecord {
            user_id,
            opened_at: Utc::now(),
        };
        self.sessions.insert(session_id.clone(), record).await;
        debug!("Opened session {} for user {}", session_id, user_id);
        session_id
    }

    /// True when the session exists and belongs to `user_id`
    pub async fn is_active(&self, session_id: &str, user_id: i32) -> bool {
        match self.sessions.get(session_id).await {
            Some(record) => record.user_id == user_id,
            None => {
                trace!("Session {} is closed or expired", session_id);
                false
            }
        }
    }

    /// Close a session. Returns the removed record, if it was still open.
    pub async fn close(&self, session_id: &str) -> Option<SessionRecord> {
        let removed = self.sessions.remove(session_id).await;
        if removed.is_some() {
            debug!("Closed session {}", session_id);
        }
        removed
    }
}
