use medjobs_portal::{AppConfig, AppState, InMemoryRepository, RepositoryState, create_router};
use std::sync::Arc;
use tokio::net::TcpListener;

const PASSWORD: &str = "e2e-admin-password";

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

/// Serves the real router (system clock, in-memory data) on a random local port.
async fn spawn_app() -> TestApp {
    let config = AppConfig {
        admin_password: PASSWORD.to_string(),
        ..AppConfig::default()
    };
    let repo = Arc::new(InMemoryRepository::new()) as RepositoryState;
    let router = create_router(AppState::new(config, repo).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

fn admin_cookie_pair(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("login should set a cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_check_and_request_id() {
    let app = spawn_app().await;
    let response = reqwest::Client::new()
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_admin_session_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let check_url = format!("{}/api/admin/check-auth", app.address);

    // 1. Anonymous
    let status: serde_json::Value = client
        .get(&check_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status, serde_json::json!({ "authenticated": false }));

    // 2. Login
    let login = client
        .post(format!("{}/api/admin/login", app.address))
        .json(&serde_json::json!({ "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(login.status(), 200);
    let cookie = admin_cookie_pair(&login);

    // 3. Authenticated with the issued cookie
    let status: serde_json::Value = client
        .get(&check_url)
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status, serde_json::json!({ "authenticated": true }));

    // 4. Admin-only route accepts it
    let specialties = client
        .get(format!("{}/api/admin/specialties", app.address))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(specialties.status(), 200);

    // 5. Logout hands back an expired, empty cookie
    let logout = client
        .post(format!("{}/api/admin/logout", app.address))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), 200);
    assert_eq!(admin_cookie_pair(&logout), "admin_token=");
}
