use super::*;
use time::macros::date;

fn register_form() -> RegisterForm {
    RegisterForm {
        email: "  User@Example.COM ".into(),
        full_name: " Luna Deseo ".into(),
        password: "Password123".into(),
        birth_date: "1990-01-01".into(),
    }
}

// =============================================================================
// email
// =============================================================================

#[test]
fn email_shape_accepts_basic_addresses() {
    assert!(is_valid_email("user@example.com"));
    assert!(is_valid_email("creadora+test@pina.co.uk"));
}

#[test]
fn email_shape_rejects_invalid_values() {
    for bad in ["", "user", "@example.com", "user@", "a@b@c.com", "user@example", "user@.com", " user@example.com"] {
        assert!(!is_valid_email(bad), "accepted {bad:?}");
    }
}

// =============================================================================
// login
// =============================================================================

#[test]
fn login_passes_credentials_through_unchanged() {
    let form = LoginForm { email: "User@Example.com".into(), password: "12345678".into(), next: None };
    let request = form.validate().unwrap();
    assert_eq!(request.email, "User@Example.com");
    assert_eq!(request.password, "12345678");
}

#[test]
fn login_reports_each_invalid_field() {
    let form = LoginForm { email: "nope".into(), password: "short".into(), next: None };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.get("email"), Some(MSG_EMAIL));
    assert_eq!(errors.get("password"), Some(MSG_PASSWORD_LEN));
}

#[test]
fn safe_next_accepts_local_paths_only() {
    assert_eq!(safe_next(Some("/dashboard")), Some("/dashboard"));
    assert_eq!(safe_next(Some("/diagnostics?x=1")), Some("/diagnostics?x=1"));
    assert_eq!(safe_next(Some("//evil.test")), None);
    assert_eq!(safe_next(Some("/\\evil.test")), None);
    assert_eq!(safe_next(Some("https://evil.test")), None);
    assert_eq!(safe_next(None), None);
}

#[test]
fn safe_next_rejects_paths_browsers_would_rewrite_offsite() {
    assert_eq!(safe_next(Some("/\t/evil.example")), None);
    assert_eq!(safe_next(Some("/\n/evil.example")), None);
    assert_eq!(safe_next(Some("/\r\n/evil.example")), None);
    assert_eq!(safe_next(Some("/ /evil.example")), None);
    assert_eq!(safe_next(Some("/dashboard\u{0}")), None);
    assert_eq!(safe_next(Some("/dashboard#top")), Some("/dashboard#top"));
}

// =============================================================================
// register
// =============================================================================

#[test]
fn register_normalizes_email_and_name() {
    let request = register_form().validate_at(date!(2026 - 10 - 16)).unwrap();
    assert_eq!(request.email, "user@example.com");
    assert_eq!(request.full_name, "Luna Deseo");
    assert_eq!(request.birth_date, "1990-01-01");
}

#[test]
fn register_password_rules_in_order() {
    let cases = [
        ("Pass1", MSG_PASSWORD_LEN),
        ("password123", MSG_PASSWORD_UPPER),
        ("PASSWORD123", MSG_PASSWORD_LOWER),
        ("PasswordABC", MSG_PASSWORD_DIGIT),
    ];
    for (password, expected) in cases {
        let form = RegisterForm { password: password.into(), ..register_form() };
        let errors = form.validate_at(date!(2026 - 10 - 16)).unwrap_err();
        assert_eq!(errors.get("password"), Some(expected), "password {password:?}");
    }
}

#[test]
fn register_rejects_short_name() {
    let form = RegisterForm { full_name: " A ".into(), ..register_form() };
    let errors = form.validate_at(date!(2026 - 10 - 16)).unwrap_err();
    assert_eq!(errors.get("full_name"), Some(MSG_NAME));
    assert_eq!(errors.get("email"), None);
}

#[test]
fn adulthood_boundary_is_the_eighteenth_birthday() {
    let today = date!(2026 - 10 - 16);
    assert!(is_adult("2008-10-16", today));
    assert!(!is_adult("2008-10-17", today));
    assert!(is_adult("2008-09-30", today));
}

#[test]
fn malformed_or_future_birth_dates_are_rejected() {
    let today = date!(2026 - 10 - 16);
    for bad in ["", "16/10/1990", "1990-13-01", "1990-02-30", "2030-01-01"] {
        assert!(!is_adult(bad, today), "accepted {bad:?}");
    }
}
