mod memory;
mod storage;

pub use memory::InMemorySessionStore;
pub use storage::{SessionHandle, SessionStore};

use crate::models::Session;
use uuid::Uuid;

/// Create a new session with a fresh identifier and empty history
pub fn create_new_session() -> Session {
    Session::new(Uuid::new_v4().to_string())
}
