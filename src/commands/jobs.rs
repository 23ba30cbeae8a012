//! Jobs command - Background job management.
//!
//! Provides CLI commands to manage background jobs:
//! - `work`: Start the job worker process
//! - `list`: Show pending/failed jobs
//! - `clear`: Remove failed jobs from the queue

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
        JobsAction::List => list_jobs(&config).await,
        JobsAction::Clear => clear_failed_jobs(&config).await,
    }
}

/// Start the background job worker
///
/// Connects to the database and starts processing jobs from the queue.
/// Uses apalis with PostgreSQL storage for job persistence.
async fn run_worker(config: &Config) -> AppResult<()> {
    use apalis::prelude::*;
    use apalis_sql::postgres::PostgresStorage;
    use apalis_sql::sqlx::postgres::PgPoolOptions;

    use crate::jobs::{email_job_handler, EmailJob};

    tracing::info!("Connecting to database for job worker...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    // Run migrations for apalis tables first
    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

    let email_storage: PostgresStorage<EmailJob> = PostgresStorage::new(pool);

    tracing::info!("Job worker started. Press Ctrl+C to stop.");

    let worker = WorkerBuilder::new("email-worker")
        .backend(email_storage)
        .build_fn(email_job_handler);

    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Job worker stopped.");
    Ok(())
}

/// List pending and failed jobs
///
/// Queries the apalis job tables and displays status counts.
async fn list_jobs(config: &Config) -> AppResult<()> {
    use sea_orm::{ConnectionTrait, Database, Statement};

    tracing::info!("Connecting to database...");

    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    if !apalis_schema_exists(&db).await? {
        println!("\n=== Job Queue Status ===");
        println!("Job queue not initialized.");
        println!("Run 'jobs work' first to create the queue tables.");
        println!("========================\n");
        return Ok(());
    }

    let rows = db
        .query_all(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT status::text as status, COUNT(*)::bigint as count FROM apalis.jobs GROUP BY status".to_string(),
        ))
        .await
        .unwrap_or_default();

    let mut pending = 0i64;
    let mut running = 0i64;
    let mut failed = 0i64;
    let mut done = 0i64;

    for row in rows {
        if let (Ok(status), Ok(count)) = (
            row.try_get::<String>("", "status"),
            row.try_get::<i64>("", "count"),
        ) {
            match status.as_str() {
                "Pending" => pending = count,
                "Running" => running = count,
                "Failed" => failed = count,
                "Done" => done = count,
                _ => {}
            }
        }
    }

    println!("\n=== Job Queue Status ===");
    println!("Pending:  {}", pending);
    println!("Running:  {}", running);
    println!("Failed:   {}", failed);
    println!("Done:     {}", done);
    println!("========================\n");

    Ok(())
}

/// Clear failed jobs from the queue
async fn clear_failed_jobs(config: &Config) -> AppResult<()> {
    use sea_orm::{ConnectionTrait, Database, Statement};

    tracing::info!("Connecting to database...");

    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    if !apalis_schema_exists(&db).await? {
        println!("Job queue not initialized. Nothing to clear.");
        return Ok(());
    }

    let result = db
        .execute(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "DELETE FROM apalis.jobs WHERE status = 'Failed'".to_string(),
        ))
        .await
        .map_err(|e| AppError::internal(format!("Failed to clear jobs: {}", e)))?;

    let count = result.rows_affected();
    println!("Cleared {} failed job(s) from the queue.", count);

    Ok(())
}

async fn apalis_schema_exists(db: &sea_orm::DatabaseConnection) -> AppResult<bool> {
    use sea_orm::{ConnectionTrait, Statement};

    let result = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') as exists".to_string(),
        ))
        .await
        .map_err(|e| AppError::internal(format!("Query failed: {}", e)))?;

    Ok(result
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false))
}
