//! Login page: Google OAuth button plus email/password form.

use leptos::prelude::*;

use super::layout::{FieldError, Shell};
pub use crate::api::auth::GOOGLE_LOGIN_HREF;
use crate::forms::FieldErrors;
use crate::toast::Toast;

/// Notice for an `error` query value set by the guard or the callback.
#[must_use]
pub fn error_notice(code: &str) -> Option<&'static str> {
    match code {
        "auth_required" => Some("Inicia sesión para continuar."),
        "auth_failed" => Some("No fue posible autenticarte. Intenta de nuevo."),
        "fetch_user_failed" => Some("No se pudo cargar tu perfil. Intenta de nuevo."),
        _ => None,
    }
}

#[component]
pub fn LoginPage(
    toast: Option<Toast>,
    notice: Option<&'static str>,
    email: String,
    next: Option<String>,
    errors: FieldErrors,
) -> impl IntoView {
    view! {
        <Shell title="Iniciar Sesión" toast>
            <section class="card">
                <h1>"Iniciar Sesión"</h1>
                <p class="card__description">"Ingresa tus credenciales o usa un proveedor"</p>
                {notice.map(|notice| view! { <p class="notice" role="alert">{notice}</p> })}

                <a href=GOOGLE_LOGIN_HREF class="btn btn--outline">"Iniciar sesión con Google"</a>
                <p class="divider">"O continúa con"</p>

                <form method="post" action="/login" class="form">
                    {next.map(|next| view! { <input type="hidden" name="next" value=next/> })}
                    <label for="email">"Email"</label>
                    <input id="email" name="email" type="text" placeholder="creadora@pina.com" value=email/>
                    <FieldError message=errors.get("email")/>
                    <label for="password">"Contraseña"</label>
                    <input id="password" name="password" type="password"/>
                    <FieldError message=errors.get("password")/>
                    <button type="submit" class="btn btn--primary">"Iniciar Sesión"</button>
                </form>

                <p class="card__footer">"¿No tienes cuenta? " <a href="/register">"Regístrate"</a></p>
            </section>
        </Shell>
    }
}
