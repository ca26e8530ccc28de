//! Pina creator web front-end.
//!
//! A server-rendered backend-for-frontend: browser forms post here, this
//! server talks to the Pina authentication backend and keeps the session in
//! `HttpOnly` cookies.

pub mod api;
pub mod config;
pub mod forms;
pub mod guard;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;
pub mod toast;
