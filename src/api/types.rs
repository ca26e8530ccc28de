//! Wire types of the backend authentication service.

use serde::{Deserialize, Serialize};

pub use crate::session::{SessionData, User};

/// Body of a successful `POST /auth/login` (and `POST /auth/refresh`).
pub type LoginResponse = SessionData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Creator registration payload. KYC fields are collected in a later step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
}

/// Body of a successful registration: verification starts out pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycResponse {
    pub status: KycStatus,
    #[serde(default)]
    pub message: String,
    pub user_id: String,
}

/// `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub env: String,
    #[serde(default)]
    pub version: String,
}
