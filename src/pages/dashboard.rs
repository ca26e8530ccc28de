//! Dashboard: verified profile plus session actions.

use leptos::prelude::*;

use super::layout::Shell;
use crate::session::User;
use crate::toast::Toast;

#[component]
pub fn DashboardPage(toast: Option<Toast>, user: User) -> impl IntoView {
    view! {
        <Shell title="Dashboard" toast>
            <section class="card">
                <h1>"Dashboard"</h1>
                <p class="card__description">"Verificación de sesión y perfil"</p>
                <dl class="profile">
                    <dt>"Nombre:"</dt>
                    <dd>{user.full_name}</dd>
                    <dt>"Email:"</dt>
                    <dd>{user.email}</dd>
                    <dt>"Proveedor:"</dt>
                    <dd>{user.provider}</dd>
                </dl>
                <div class="actions">
                    <form method="post" action="/dashboard/refresh">
                        <button type="submit" class="btn btn--secondary">"Refrescar sesión"</button>
                    </form>
                    <form method="post" action="/dashboard/logout">
                        <button type="submit" class="btn btn--destructive">"Cerrar sesión"</button>
                    </form>
                </div>
                <p class="card__footer"><a href="/diagnostics">"Diagnóstico"</a></p>
            </section>
        </Shell>
    }
}
