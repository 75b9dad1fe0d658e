mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{
    NOW, TEST_PASSWORD, admin_cookie_header, admin_token, body_json, codec_at,
    set_cookie_headers, test_config, test_state, test_state_with_config,
};
use medjobs_portal::{
    AppConfig, InMemoryRepository, create_router,
    config::Env,
    models::Specialty,
    repository::Repository,
    seed,
};
use tower::util::ServiceExt;

fn app() -> axum::Router {
    create_router(test_state(InMemoryRepository::new()))
}

async fn get(app: axum::Router, uri: &str, cookie: Option<&str>) -> axum::http::Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> axum::http::Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

// --- GET /api/admin/check-auth ---

#[tokio::test]
async fn test_check_auth_without_cookie_is_unauthenticated() {
    let response = get(app(), "/api/admin/check-auth", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "authenticated": false })
    );
}

#[tokio::test]
async fn test_check_auth_with_valid_cookie() {
    let cookie = admin_cookie_header(&admin_token());
    let response = get(app(), "/api/admin/check-auth", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "authenticated": true })
    );
}

#[tokio::test]
async fn test_check_auth_with_expired_cookie_is_still_200() {
    // Signed an hour and a half before `NOW`, with a one-hour lifetime.
    let stale = codec_at(NOW - 5400).sign(true).unwrap();
    let cookie = admin_cookie_header(&stale);
    let response = get(app(), "/api/admin/check-auth", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "authenticated": false })
    );
}

#[tokio::test]
async fn test_check_auth_with_garbage_cookie_is_still_200() {
    let response = get(app(), "/api/admin/check-auth", Some("admin_token=abc.def.ghi")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "authenticated": false })
    );
}

// --- POST /api/admin/logout ---

#[tokio::test]
async fn test_logout_clears_cookie_with_security_flags() {
    let cookie = admin_cookie_header(&admin_token());
    let response = post_json(app(), "/api/admin/logout", Some(&cookie), serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookies = set_cookie_headers(&response);
    assert_eq!(set_cookies.len(), 1);

    let removal = &set_cookies[0];
    assert!(removal.starts_with("admin_token=;"), "{removal}");
    assert!(removal.contains("Max-Age=0"));
    assert!(removal.contains("Path=/"));
    assert!(removal.contains("HttpOnly"));
    assert!(removal.contains("SameSite=Strict"));
    // Local config: not served over HTTPS.
    assert!(!removal.contains("Secure"));

    assert_eq!(body_json(response).await, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn test_logout_without_cookie_is_idempotent() {
    for _ in 0..2 {
        let response = post_json(app(), "/api/admin/logout", None, serde_json::json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!({ "success": true }));
    }
}

// --- POST /api/admin/login ---

#[tokio::test]
async fn test_login_issues_working_admin_cookie() {
    let app = app();
    let response = post_json(
        app.clone(),
        "/api/admin/login",
        None,
        serde_json::json!({ "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookies = set_cookie_headers(&response);
    assert_eq!(set_cookies.len(), 1);
    let issued = &set_cookies[0];
    assert!(issued.contains("HttpOnly"));
    assert!(issued.contains("SameSite=Strict"));
    assert!(issued.contains("Max-Age=3600"));

    // Replay the issued cookie against the soft check.
    let pair = issued.split(';').next().unwrap().to_string();
    let check = get(app, "/api/admin/check-auth", Some(&pair)).await;
    assert_eq!(
        body_json(check).await,
        serde_json::json!({ "authenticated": true })
    );
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let response = post_json(
        app(),
        "/api/admin/login",
        None,
        serde_json::json!({ "password": "nope" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie_headers(&response).is_empty());
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Invalid credentials" })
    );
}

#[tokio::test]
async fn test_production_cookies_are_secure() {
    let config = AppConfig {
        env: Env::Production,
        ..test_config()
    };
    let app = create_router(test_state_with_config(config, InMemoryRepository::new()));

    let login = post_json(
        app.clone(),
        "/api/admin/login",
        None,
        serde_json::json!({ "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let issued = set_cookie_headers(&login);
    assert_eq!(issued.len(), 1);
    assert!(issued[0].starts_with("admin_token="));
    assert!(issued[0].contains("Secure"), "{}", issued[0]);

    let cookie = admin_cookie_header(&admin_token());
    let logout = post_json(app, "/api/admin/logout", Some(&cookie), serde_json::json!({})).await;
    assert_eq!(logout.status(), StatusCode::OK);
    let removal = set_cookie_headers(&logout);
    assert_eq!(removal.len(), 1);
    assert!(removal[0].starts_with("admin_token=;"));
    assert!(removal[0].contains("Max-Age=0"));
    assert!(removal[0].contains("Secure"), "{}", removal[0]);
}

// --- GET /api/admin/specialties (hard check) ---

#[tokio::test]
async fn test_admin_only_route_rejects_without_session() {
    let response = get(app(), "/api/admin/specialties", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "admin access required" })
    );
}

#[tokio::test]
async fn test_admin_only_route_rejects_non_admin_token() {
    let token = codec_at(NOW).sign(false).unwrap();
    let cookie = admin_cookie_header(&token);
    let response = get(app(), "/api/admin/specialties", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_only_route_serves_admin() {
    let repo = InMemoryRepository::new();
    seed::seed_specialties(&repo, &seed::specialties()).await.unwrap();
    let expected = repo.list_specialties().await.unwrap();

    let app = create_router(test_state(repo));
    let cookie = admin_cookie_header(&admin_token());
    let response = get(app, "/api/admin/specialties", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let specialties: Vec<Specialty> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(specialties, expected);
    assert_eq!(specialties.len(), seed::specialties().len());
}

#[tokio::test]
async fn test_health_check() {
    let response = get(app(), "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
