use super::dashboard::DashboardPage;
use super::diagnostics::DiagnosticsPage;
use super::login::{GOOGLE_LOGIN_HREF, LoginPage, error_notice};
use super::register::RegisterPage;
use super::*;
use leptos::prelude::*;
use crate::api::types::HealthStatus;
use crate::forms::{LoginForm, RegisterForm};
use crate::session::User;
use crate::toast::Toast;

fn user() -> User {
    User {
        id: "1".into(),
        email: "luna@pina.com".into(),
        full_name: "Luna Deseo".into(),
        provider: "google".into(),
        token_version: 1,
    }
}

#[test]
fn login_page_has_google_link_form_and_notice() {
    let Html(html) = render(|| {
        view! {
            <LoginPage
                toast=None
                notice=error_notice("auth_required")
                email="luna@pina.com".to_owned()
                next=Some("/diagnostics".to_owned())
                errors=Default::default()
            />
        }
    });
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(GOOGLE_LOGIN_HREF));
    assert!(html.contains("action=\"/login\""));
    assert!(html.contains("Inicia sesión para continuar."));
    assert!(html.contains("value=\"/diagnostics\""));
    assert!(html.contains("value=\"luna@pina.com\""));
}

#[test]
fn login_page_shows_field_errors() {
    let errors = LoginForm { email: "x".into(), password: "1".into(), next: None }.validate().unwrap_err();
    let Html(html) = render(|| {
        view! { <LoginPage toast=None notice=None email="x".to_owned() next=None errors/> }
    });
    assert!(html.contains("Email inválido"));
    assert!(html.contains("La contraseña debe tener al menos 8 caracteres"));
}

#[test]
fn unknown_error_code_has_no_notice() {
    assert_eq!(error_notice("something_else"), None);
    assert!(error_notice("fetch_user_failed").is_some());
}

#[test]
fn register_page_never_echoes_password() {
    let form = RegisterForm {
        email: "luna@pina.com".into(),
        full_name: "Luna".into(),
        password: "SuperSecret1".into(),
        birth_date: "1990-01-01".into(),
    };
    let Html(html) = render(|| view! { <RegisterPage toast=None form errors=Default::default()/> });
    assert!(html.contains("action=\"/register\""));
    assert!(html.contains("value=\"1990-01-01\""));
    assert!(!html.contains("SuperSecret1"));
}

#[test]
fn dashboard_shows_profile_and_toast() {
    let toast = Toast::success("Sesión verificada", Some("Perfil cargado correctamente"));
    let Html(html) = render(|| view! { <DashboardPage toast=Some(toast) user=user()/> });
    assert!(html.contains("Luna Deseo"));
    assert!(html.contains("luna@pina.com"));
    assert!(html.contains("google"));
    assert!(html.contains("toast--default"));
    assert!(html.contains("Sesión verificada"));
    assert!(html.contains("action=\"/dashboard/logout\""));
    assert!(html.contains("action=\"/dashboard/refresh\""));
}

#[test]
fn diagnostics_reports_health_and_cookie_presence() {
    let health = HealthStatus {
        status: "ok".into(),
        timestamp: "2026-01-01T00:00:00Z".into(),
        env: "dev".into(),
        version: "1.2.3".into(),
    };
    let cookies = vec![("accessToken", true), ("refreshToken", false)];
    let Html(html) = render(|| view! { <DiagnosticsPage health=Some(health) cookies/> });
    assert!(html.contains("1.2.3"));
    assert!(html.contains("presente"));
    assert!(html.contains("ausente"));
}

#[test]
fn diagnostics_without_backend_shows_notice() {
    let Html(html) = render(|| view! { <DiagnosticsPage health=None cookies=Vec::new()/> });
    assert!(html.contains("No se pudo conectar al backend"));
}
