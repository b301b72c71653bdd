//! Registry of live session stores.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::SessionId;
use domain::OrderStore;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

/// How long a session may go untouched before it is evicted.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One session's store. The mutex is the single entry point that
/// serializes its commands.
pub type SharedStore = Arc<Mutex<OrderStore>>;

struct SessionEntry {
    store: SharedStore,
    last_access: Instant,
}

/// Maps session ids to their stores.
///
/// A store lives from [`SessionRegistry::create`] until
/// [`SessionRegistry::remove`], or until it has been idle for longer than
/// the registry's idle timeout and [`SessionRegistry::evict_idle`] runs.
/// Nothing is persisted.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Starts a session with an empty store.
    pub async fn create(&self) -> SessionId {
        let store = OrderStore::new();
        let session_id = store.session_id();
        let entry = SessionEntry {
            store: Arc::new(Mutex::new(store)),
            last_access: Instant::now(),
        };
        self.sessions.write().await.insert(session_id, entry);
        metrics::gauge!("order_sessions_active").increment(1.0);
        tracing::info!(session = %session_id, "session started");
        session_id
    }

    /// Looks up a session and marks it as used.
    pub async fn get(&self, session_id: SessionId) -> Option<SharedStore> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&session_id)?;
        entry.last_access = Instant::now();
        Some(Arc::clone(&entry.store))
    }

    /// Ends a session, discarding its state. Returns false if it was unknown.
    pub async fn remove(&self, session_id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&session_id).is_some();
        if removed {
            metrics::gauge!("order_sessions_active").decrement(1.0);
            tracing::info!(session = %session_id, "session ended");
        }
        removed
    }

    /// Drops every session not used within the idle timeout and returns how
    /// many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|session_id, entry| {
            let keep = now.duration_since(entry.last_access) < self.idle_timeout;
            if !keep {
                tracing::info!(session = %session_id, "session expired");
            }
            keep
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            metrics::gauge!("order_sessions_active").decrement(evicted as f64);
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
