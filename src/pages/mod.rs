//! Server-rendered page components.
//!
//! Pages are plain Leptos components rendered to an HTML string per request.
//! There is no hydration: forms post back to this server and every
//! interaction ends in a redirect or a fresh render.

pub mod dashboard;
pub mod diagnostics;
pub mod layout;
pub mod login;
pub mod register;

use axum::response::Html;
use leptos::prelude::*;

/// Render a page inside a fresh reactive owner.
pub fn render<F, V>(page: F) -> Html<String>
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    Html(owner.with(|| page().to_html()))
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
