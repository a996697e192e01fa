use crate::config::{init_database, migrate_database, AppSettings};
use crate::errors::InternalError;

/// Connect and run all pending migrations without building the full AppData
pub async fn run_migrations(settings: &AppSettings) -> Result<(), InternalError> {
    tracing::info!("Running database migrations...");

    let db = init_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
