//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};
use crate::jobs::EmailJob;
use crate::services::validate_field_map;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Refuse to start with a broken field map
    validate_field_map()?;

    // Initialize database
    let db = Arc::new(Database::connect(&config).await);
    tracing::info!("Database connected");

    // Initialize Redis cache
    let cache = Arc::new(Cache::connect(&config).await);
    tracing::info!("Redis cache connected");

    // Email queue shares the database; the worker process drains it
    let email_queue = setup_email_queue(&config).await;
    if email_queue.is_none() {
        tracing::warn!("Email queue unavailable; welcome emails will be skipped");
    }

    let app_state = AppState::from_config(db, cache, config, email_queue);

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn setup_email_queue(config: &Config) -> Option<PostgresStorage<EmailJob>> {
    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect job queue pool");
            return None;
        }
    };

    if let Err(e) = PostgresStorage::setup(&pool).await {
        tracing::error!(error = %e, "failed to set up job storage");
        return None;
    }

    Some(PostgresStorage::new(pool))
}
