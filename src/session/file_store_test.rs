use super::*;
use crate::session::types::User;

fn temp_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("pina-session-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}

fn session_data() -> SessionData {
    SessionData {
        access_token: "at".into(),
        refresh_token: "rt".into(),
        user: User {
            id: "1".into(),
            email: "user@example.com".into(),
            full_name: "User".into(),
            provider: "local".into(),
            token_version: 1,
        },
    }
}

fn cleanup(path: &Path) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn missing_file_opens_empty() {
    let path = temp_path();
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.snapshot(), Session::default());
    assert!(!path.exists());
}

#[test]
fn set_session_survives_reopen() {
    let path = temp_path();
    let store = FileStore::open(&path).unwrap();
    store.set_session(session_data());

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.access_token().as_deref(), Some("at"));
    assert_eq!(reopened.refresh_token().as_deref(), Some("rt"));
    assert_eq!(reopened.user().map(|u| u.email), Some("user@example.com".to_owned()));
    cleanup(&path);
}

#[test]
fn persisted_document_uses_state_envelope() {
    let path = temp_path();
    let store = FileStore::open(&path).unwrap();
    store.set_session(session_data());

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["version"], 0);
    assert_eq!(json["state"]["accessToken"], "at");
    assert_eq!(json["state"]["user"]["fullName"], "User");
    cleanup(&path);
}

#[test]
fn clear_session_persists_empty_state() {
    let path = temp_path();
    let store = FileStore::open(&path).unwrap();
    store.set_session(session_data());
    store.clear_session();

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.snapshot(), Session::default());
    cleanup(&path);
}

#[test]
fn corrupt_file_opens_empty() {
    let path = temp_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{not json").unwrap();

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.snapshot(), Session::default());
    cleanup(&path);
}

#[test]
fn partial_session_on_disk_is_ignored() {
    let path = temp_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"state":{"accessToken":"at","refreshToken":null,"user":null},"version":0}"#).unwrap();

    let store = FileStore::open(&path).unwrap();
    assert!(store.access_token().is_none());
    cleanup(&path);
}
