use medjobs_portal::{
    repository::PostgresRepository,
    seed::{self, SeedError},
};
use sqlx::postgres::PgPoolOptions;
use std::process::ExitCode;

/// Seeds the specialty reference data. No flags; exits 0 on success, 1 on any error.
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medjobs_portal=info,seed=info".into()),
        )
        .init();

    match run().await {
        Ok(report) => {
            tracing::info!(
                inserted = report.inserted,
                skipped = report.skipped,
                "seed finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "seed failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<seed::SeedReport, SeedError> {
    let db_url = seed::database_url_from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await
        .map_err(SeedError::Connect)?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = PostgresRepository::new(pool);
    seed::seed_specialties(&repo, &seed::specialties()).await
}
