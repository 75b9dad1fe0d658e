#![allow(dead_code)]

use axum::{body::Body, http::Response};
use medjobs_portal::{
    AdminGuard, AdminTokenCodec, AppConfig, AppState, InMemoryRepository, RepositoryState,
    api::app_router,
    auth::FixedClock,
};
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-admin-secret-value-1234567890";
pub const TEST_PASSWORD: &str = "correct horse battery staple";
pub const TEST_TTL: u64 = 3600;
/// Frozen "now" used by codecs in tests.
pub const NOW: u64 = 1_700_000_000;

pub fn codec_at(now: u64) -> AdminTokenCodec {
    AdminTokenCodec::new(TEST_SECRET, TEST_TTL, Arc::new(FixedClock(now))).unwrap()
}

pub fn guard() -> AdminGuard {
    AdminGuard::new(codec_at(NOW))
}

pub fn test_config() -> AppConfig {
    AppConfig {
        admin_jwt_secret: TEST_SECRET.to_string(),
        admin_password: TEST_PASSWORD.to_string(),
        admin_token_ttl_secs: TEST_TTL,
        ..AppConfig::default()
    }
}

/// State over an in-memory repository with the codec frozen at `NOW`.
pub fn test_state(repo: InMemoryRepository) -> AppState {
    test_state_with_config(test_config(), repo)
}

pub fn test_state_with_config(config: AppConfig, repo: InMemoryRepository) -> AppState {
    let repo = Arc::new(repo) as RepositoryState;
    let registry = app_router(repo.clone()).unwrap();
    AppState::with_parts(config, repo, guard(), registry)
}

pub fn admin_token() -> String {
    codec_at(NOW).sign(true).unwrap()
}

pub fn admin_cookie_header(token: &str) -> String {
    format!("admin_token={token}")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn set_cookie_headers(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}
