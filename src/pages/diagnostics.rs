//! Internal page showing backend health and which session cookies are set.

use leptos::prelude::*;

use super::layout::Shell;
use crate::api::types::HealthStatus;

#[component]
pub fn DiagnosticsPage(health: Option<HealthStatus>, cookies: Vec<(&'static str, bool)>) -> impl IntoView {
    let health = match health {
        Some(h) => view! {
            <ul class="health">
                <li><strong>"status:"</strong> " " {h.status}</li>
                <li><strong>"env:"</strong> " " {h.env}</li>
                <li><strong>"version:"</strong> " " {h.version}</li>
                <li><strong>"timestamp:"</strong> " " {h.timestamp}</li>
            </ul>
        }
        .into_any(),
        None => view! { <p class="notice">"No se pudo conectar al backend via /api/pina/health."</p> }.into_any(),
    };

    view! {
        <Shell title="Diagnostics" toast=None>
            <section class="card">
                <h1>"Diagnostics"</h1>
                <p class="card__description">"Herramienta interna para revisar sesión y conectividad."</p>
                <h2>"Backend Health"</h2>
                {health}
                <h2>"Cookies de Sesión"</h2>
                <ul class="cookies">
                    {cookies
                        .into_iter()
                        .map(|(name, present)| {
                            let state = if present { "presente" } else { "ausente" };
                            view! { <li><code>{name}</code> ": " {state}</li> }
                        })
                        .collect_view()}
                </ul>
            </section>
        </Shell>
    }
}
