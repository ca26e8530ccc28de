//! Creator registration page.

use leptos::prelude::*;

use super::layout::{FieldError, Shell};
use crate::forms::{FieldErrors, RegisterForm};
use crate::toast::Toast;

/// `form` carries the submitted values back on a failed validation; the
/// password is never echoed.
#[component]
pub fn RegisterPage(toast: Option<Toast>, form: RegisterForm, errors: FieldErrors) -> impl IntoView {
    view! {
        <Shell title="Crear cuenta" toast>
            <section class="card">
                <h1>"Crear cuenta"</h1>
                <form method="post" action="/register" class="form">
                    <label for="email">"Email"</label>
                    <input id="email" name="email" type="email" placeholder="tu@email.com" value=form.email/>
                    <FieldError message=errors.get("email")/>

                    <label for="full_name">"Nombre completo"</label>
                    <input id="full_name" name="full_name" type="text" placeholder="Ej: Luna Deseo" value=form.full_name/>
                    <FieldError message=errors.get("full_name")/>

                    <label for="password">"Contraseña"</label>
                    <input id="password" name="password" type="password"/>
                    <FieldError message=errors.get("password")/>

                    <label for="birth_date">"Fecha de nacimiento"</label>
                    <input id="birth_date" name="birth_date" type="date" value=form.birth_date/>
                    <FieldError message=errors.get("birth_date")/>

                    <button type="submit" class="btn btn--primary">"Crear cuenta"</button>
                </form>
                <p class="card__footer">"¿Ya tienes cuenta? " <a href="/login">"Inicia sesión"</a></p>
            </section>
        </Shell>
    }
}
