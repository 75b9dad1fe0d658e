use crate::{
    AppState,
    api::RequestContext,
    auth::{AdminSession, admin_cookie, removal_cookie},
    error::ApiError,
    models::{AdminLoginRequest, AuthStatus, ErrorResponse, Specialty, SuccessResponse},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde_json::Value;
use subtle::ConstantTimeEq;

// --- Admin Session Handlers ---

/// check_auth
///
/// [Public Route] Reports whether the caller holds a valid admin session. A missing,
/// tampered, expired or non-admin token is simply `authenticated: false`.
#[utoipa::path(
    get,
    path = "/api/admin/check-auth",
    responses((status = 200, description = "Admin session state", body = AuthStatus))
)]
pub async fn check_auth(State(state): State<AppState>, jar: CookieJar) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: state.guard.verify_admin_auth(&jar),
    })
}

/// admin_login
///
/// [Public Route] Exchanges the admin password for a signed `admin_token` cookie.
/// The password comparison is constant-time.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Logged in", body = SuccessResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expected = state.config.admin_password.as_bytes();
    let matches: bool = payload.password.as_bytes().ct_eq(expected).into();

    if !matches {
        tracing::warn!("admin login rejected");
        return Ok((
            StatusCode::UNAUTHORIZED,
            jar,
            Json(serde_json::json!({ "error": "Invalid credentials" })),
        ));
    }

    let codec = state.guard.codec();
    let token = codec.sign(true)?;
    let cookie = admin_cookie(token, codec.ttl_secs(), state.config.cookie_secure());

    tracing::info!("admin logged in");
    Ok((
        StatusCode::OK,
        jar.add(cookie),
        Json(serde_json::json!({ "success": true })),
    ))
}

/// admin_logout
///
/// [Public Route] Clears the `admin_token` cookie. Succeeds whether or not a cookie
/// was present.
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses((status = 200, description = "Logged out", body = SuccessResponse))
)]
pub async fn admin_logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let jar = jar.add(removal_cookie(state.config.cookie_secure()));
    tracing::info!("admin logged out");
    (jar, Json(SuccessResponse { success: true }))
}

/// admin_specialties
///
/// [Admin Route] Lists the seeded specialty reference data.
#[utoipa::path(
    get,
    path = "/api/admin/specialties",
    responses(
        (status = 200, description = "Specialties", body = [Specialty]),
        (status = 401, description = "Admin access required", body = ErrorResponse)
    )
)]
pub async fn admin_specialties(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Specialty>>, ApiError> {
    Ok(Json(state.repo.list_specialties().await?))
}

// --- Procedure Endpoint ---

/// trpc
///
/// [Public Route] Single entry point for every registered procedure. The body is the
/// procedure's JSON input (may be empty); the admin flag of the request context comes
/// from the caller's `admin_token` cookie. Procedures enforce their own access rules.
#[utoipa::path(
    post,
    path = "/api/trpc/{path}",
    params(("path" = String, Path, description = "Procedure path, e.g. `jobOffers.list`")),
    request_body(content = Option<Value>, description = "Procedure JSON input (may be empty)", content_type = "application/json"),
    responses(
        (status = 200, description = "Procedure result, wrapped as `{ result: { data } }`"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Unknown procedure", body = ErrorResponse)
    )
)]
pub async fn trpc(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(path): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let input = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)?
    };

    let ctx = RequestContext::from_cookies(&state.guard, &jar);
    let data = state.registry.dispatch(&path, input, &ctx).await?;
    Ok(Json(serde_json::json!({ "result": { "data": data } })))
}
