use askweb::models::{Message, Role};
use askweb::session::{InMemorySessionStore, SessionStore};
use std::sync::Arc;

#[tokio::test]
async fn resolve_without_id_creates_empty_session() {
    let store = InMemorySessionStore::new();

    let (id, handle) = store.resolve(None);
    let session = handle.lock().await;

    assert!(!id.is_empty());
    assert_eq!(session.session_id, id);
    assert!(session.messages.is_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn resolve_without_id_never_reuses_an_id() {
    let store = InMemorySessionStore::new();

    let (first, _) = store.resolve(None);
    let (second, _) = store.resolve(None);

    assert_ne!(first, second);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn resolve_existing_id_returns_same_history() {
    let store = InMemorySessionStore::new();
    let (id, handle) = store.resolve(None);

    handle.lock().await.messages.push(Message::user("hello"));

    let (again_id, again) = store.resolve(Some(&id));
    assert_eq!(again_id, id);
    assert!(Arc::ptr_eq(&handle, &again));
    assert_eq!(again.lock().await.messages.len(), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn resolve_unknown_id_creates_a_fresh_session() {
    let store = InMemorySessionStore::new();

    let (id, _) = store.resolve(Some("not-a-session"));

    assert_ne!(id, "not-a-session");
    assert!(store.get("not-a-session").is_none());
    assert!(store.get(&id).is_some());
}

#[test]
fn get_does_not_create_sessions() {
    let store = InMemorySessionStore::new();
    assert!(store.get("missing").is_none());
    assert!(store.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_turns_on_one_session_do_not_interleave() {
    let store = Arc::new(InMemorySessionStore::new());
    let (id, _) = store.resolve(None);

    let mut tasks = Vec::new();
    for turn in 0..16 {
        let store = Arc::clone(&store);
        let id = id.clone();
        tasks.push(tokio::spawn(async move {
            let (_, handle) = store.resolve(Some(&id));
            let mut session = handle.lock().await;
            session.messages.push(Message::user(format!("question {}", turn)));
            tokio::task::yield_now().await;
            session
                .messages
                .push(Message::assistant(Some(format!("answer {}", turn)), None));
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let handle = store.get(&id).unwrap();
    let session = handle.lock().await;
    assert_eq!(session.messages.len(), 32);
    for pair in session.messages.chunks(2) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[1].role, Role::Assistant);
        let turn = pair[0].content.as_deref().unwrap().trim_start_matches("question ");
        assert_eq!(
            pair[1].content.as_deref().unwrap(),
            format!("answer {}", turn)
        );
    }
}
