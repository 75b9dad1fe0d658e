use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Admin Router Module
///
/// Mounted under `/api/admin`. The session endpoints are open by nature (they report,
/// create or clear the session); everything else requires the `AdminSession` extractor.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/admin/check-auth
        // Soft check: always 200 with `{ authenticated }`.
        .route("/check-auth", get(handlers::check_auth))
        // POST /api/admin/login
        // Issues the `admin_token` cookie on a correct password.
        .route("/login", post(handlers::admin_login))
        // POST /api/admin/logout
        // Overwrites `admin_token` with an expired, empty cookie.
        .route("/logout", post(handlers::admin_logout))
        // GET /api/admin/specialties
        // Hard check: 401 without a valid admin session.
        .route("/specialties", get(handlers::admin_specialties))
}
