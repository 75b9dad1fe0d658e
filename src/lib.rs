use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
};
use std::sync::Arc;
use thiserror::Error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod seed;
pub mod session;

pub mod routes;
use routes::{admin, public};

// --- Public Re-exports ---

pub use api::{ApiRegistry, RequestContext, ServerCaller};
pub use auth::{AdminGuard, AdminTokenCodec};
pub use config::AppConfig;
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for the HTTP surface, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::check_auth, handlers::admin_login, handlers::admin_logout,
        handlers::admin_specialties, handlers::trpc,
    ),
    components(
        schemas(
            models::Specialty, models::JobOffer, models::Application, models::Message,
            models::AdminLoginRequest, models::AuthStatus, models::SuccessResponse,
            models::ErrorResponse, models::AnalyticsOverview,
            session::SessionStatus, session::UserSession, session::SessionUser,
        )
    ),
    tags(
        (name = "medjobs-portal", description = "Medical job placement platform API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Everything a request handler may need, built once at startup and cloned per
/// request. Nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryState,
    pub config: AppConfig,
    /// Admin cookie verification, built from `config`.
    pub guard: AdminGuard,
    /// Namespaced procedures served at `/api/trpc/{path}`.
    pub registry: Arc<ApiRegistry>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid admin auth configuration: {0}")]
    Auth(#[from] auth::AuthError),
    #[error("invalid API registry: {0}")]
    Registry(#[from] api::RegistryError),
}

impl AppState {
    /// Wires the codec, guard and API registry from configuration.
    pub fn new(config: AppConfig, repo: RepositoryState) -> Result<Self, StartupError> {
        let codec = AdminTokenCodec::from_config(&config)?;
        let registry = api::app_router(repo.clone())?;
        Ok(Self::with_parts(config, repo, AdminGuard::new(codec), registry))
    }

    /// Assembles a state from prebuilt parts, e.g. a codec running on a fixed clock.
    pub fn with_parts(
        config: AppConfig,
        repo: RepositoryState,
        guard: AdminGuard,
        registry: ApiRegistry,
    ) -> Self {
        Self {
            repo,
            config,
            guard,
            registry: Arc::new(registry),
        }
    }

    /// In-process caller for server-rendered pages.
    pub fn caller(&self, ctx: RequestContext) -> ServerCaller<'_> {
        self.registry.caller(ctx)
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for AdminGuard {
    fn from_ref(app_state: &AppState) -> AdminGuard {
        app_state.guard.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, applies the observability layers and registers
/// the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .nest("/api/admin", admin::admin_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for each HTTP request, tagged with the `x-request-id` set by the layer above.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
