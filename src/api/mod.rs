//! Backend API access: HTTP client, errors, wire types and auth endpoints.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, RequestOptions, build_http_client};
pub use error::ApiError;
