//! Admin authentication: the signed `admin_token` cookie, its codec, and the guard
//! that API routes use to probe or enforce admin access.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub mod guard;
pub mod token;

pub use guard::{
    ADMIN_COOKIE_NAME, AdminGuard, AdminSession, CookieReader, admin_cookie, removal_cookie,
};
pub use token::{AdminClaims, AdminTokenCodec, Clock, FixedClock, SystemClock};

/// Message carried by every rejected hard check.
pub const ADMIN_ACCESS_REQUIRED: &str = "admin access required";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{}", ADMIN_ACCESS_REQUIRED)]
    Unauthorized,
    #[error("admin token signature is invalid")]
    InvalidSignature,
    #[error("admin token has expired")]
    Expired,
    #[error("admin token is malformed")]
    MalformedToken,
    #[error("admin token verification failed: {0}")]
    Verification(String),
    #[error("failed to sign admin token: {0}")]
    Signing(String),
    #[error("admin JWT secret must not be empty")]
    EmptySecret,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": ADMIN_ACCESS_REQUIRED })),
            )
                .into_response(),
            other => {
                tracing::error!(error = %other, "admin auth fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
