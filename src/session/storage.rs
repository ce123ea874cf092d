use crate::models::Session;
use std::sync::Arc;

/// Shared handle to one session. Holding the lock serializes turns on that session.
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// Trait for session storage backends
pub trait SessionStore: Send + Sync {
    /// Return the session bound to `session_id`, or bind a fresh id to an
    /// empty session when the id is absent or unknown.
    fn resolve(&self, session_id: Option<&str>) -> (String, SessionHandle);

    /// Look up an existing session without creating one.
    fn get(&self, session_id: &str) -> Option<SessionHandle>;

    /// Number of live sessions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
