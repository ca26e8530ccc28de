use super::*;

fn sample_user() -> User {
    User {
        id: "1".into(),
        email: "user@example.com".into(),
        full_name: "User".into(),
        provider: "local".into(),
        token_version: 1,
    }
}

#[test]
fn user_uses_camel_case_on_the_wire() {
    let json = serde_json::to_value(sample_user()).unwrap();
    assert_eq!(json["fullName"], "User");
    assert_eq!(json["tokenVersion"], 1);
    assert!(json.get("full_name").is_none());
}

#[test]
fn session_data_parses_login_response() {
    let body = r#"{
        "accessToken": "at",
        "refreshToken": "rt",
        "user": {"id":"1","email":"user@example.com","fullName":"User","provider":"local","tokenVersion":1}
    }"#;
    let data: SessionData = serde_json::from_str(body).unwrap();
    assert_eq!(data.access_token, "at");
    assert_eq!(data.refresh_token, "rt");
    assert_eq!(data.user, sample_user());
}

#[test]
fn default_session_is_not_authenticated() {
    let session = Session::default();
    assert!(!session.is_authenticated());
    assert!(session.tokens().is_none());
}

#[test]
fn session_from_data_holds_both_tokens_and_user() {
    let session = Session::from(SessionData {
        access_token: "at".into(),
        refresh_token: "rt".into(),
        user: sample_user(),
    });
    assert!(session.is_authenticated());
    assert_eq!(session.tokens(), Some(("at", "rt")));
    assert_eq!(session.user, Some(sample_user()));
}

#[test]
fn session_from_tokens_has_no_user() {
    let session = Session::from_tokens("at".into(), "rt".into());
    assert!(session.is_authenticated());
    assert!(session.user.is_none());
}
