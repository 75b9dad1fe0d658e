use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without an admin session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /api/trpc/{path}
        // Combined procedure endpoint; `path` is `namespace.procedure`.
        .route("/api/trpc/{path}", post(handlers::trpc))
}
