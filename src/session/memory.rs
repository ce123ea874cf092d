use super::create_new_session;
use super::storage::{SessionHandle, SessionStore};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Process-lifetime session store. Nothing is ever evicted.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn resolve(&self, session_id: Option<&str>) -> (String, SessionHandle) {
        if let Some(id) = session_id {
            if let Some(handle) = self.get(id) {
                return (id.to_string(), handle);
            }
            tracing::debug!(session_id = id, "unknown session id, starting a new session");
        }

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let session = loop {
            let candidate = create_new_session();
            if !sessions.contains_key(&candidate.session_id) {
                break candidate;
            }
        };

        let id = session.session_id.clone();
        let handle = Arc::new(tokio::sync::Mutex::new(session));
        sessions.insert(id.clone(), Arc::clone(&handle));
        tracing::info!(session_id = %id, "created session");

        (id, handle)
    }

    fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
