use medjobs_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    repository::{PostgresRepository, RepositoryState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, initializes logging, connects to Postgres, applies
/// migrations, and serves the HTTP API.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production secrets)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: pretty locally, JSON in production
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "medjobs_portal=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Database
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("FATAL: Failed to apply database migrations.");

    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // 4. Unified state: codec, guard and API registry are built from the config here
    let bind_addr = config.bind_addr.clone();
    let app_state =
        AppState::new(config, repo).expect("FATAL: Invalid application configuration.");

    // 5. Router and server
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "HTTP server terminated");
        std::process::exit(1);
    }
}
