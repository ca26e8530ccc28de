use super::*;

fn session_data(access: &str) -> SessionData {
    SessionData {
        access_token: access.into(),
        refresh_token: format!("{access}-refresh"),
        user: User {
            id: "u1".into(),
            email: "user@example.com".into(),
            full_name: "User".into(),
            provider: "local".into(),
            token_version: 1,
        },
    }
}

#[test]
fn new_store_is_empty() {
    let store = MemoryStore::new();
    assert_eq!(store.snapshot(), Session::default());
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert!(store.user().is_none());
}

#[test]
fn set_session_replaces_everything() {
    let store = MemoryStore::new();
    store.set_session(session_data("first"));
    store.set_session(session_data("second"));

    assert_eq!(store.access_token().as_deref(), Some("second"));
    assert_eq!(store.refresh_token().as_deref(), Some("second-refresh"));
    assert_eq!(store.user().map(|u| u.id), Some("u1".to_owned()));
}

#[test]
fn clear_session_drops_tokens_and_user() {
    let store = MemoryStore::with_session(Session::from(session_data("at")));
    store.clear_session();
    assert_eq!(store.snapshot(), Session::default());
}

#[test]
fn arc_store_delegates() {
    let store = Arc::new(MemoryStore::new());
    let shared = Arc::clone(&store);
    shared.set_session(session_data("at"));
    assert_eq!(store.access_token().as_deref(), Some("at"));
}
