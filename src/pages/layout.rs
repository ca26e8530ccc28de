//! Document shell and toast banner shared by every page.

use leptos::prelude::*;

use crate::toast::Toast;

#[component]
pub fn Shell(#[prop(into)] title: String, toast: Option<Toast>, children: Children) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{format!("{title} · Pina")}</title>
                <link rel="stylesheet" href="/assets/app.css"/>
            </head>
            <body>
                {toast.map(|toast| view! { <ToastBanner toast/> })}
                <main class="page">{children()}</main>
            </body>
        </html>
    }
}

#[component]
pub fn ToastBanner(toast: Toast) -> impl IntoView {
    let class = format!("toast toast--{}", toast.variant.as_str());
    view! {
        <div class=class role="status" aria-live="polite">
            <strong class="toast__title">{toast.title}</strong>
            {toast.description.map(|description| view! { <p class="toast__description">{description}</p> })}
        </div>
    }
}

/// Inline validation message under a form field.
#[component]
pub fn FieldError(message: Option<&'static str>) -> impl IntoView {
    message.map(|message| view! { <p class="field-error">{message}</p> })
}
