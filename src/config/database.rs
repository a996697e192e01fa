use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::AppSettings;
use crate::errors::InternalError;

/// Connect to the database named in settings
///
/// Does NOT run migrations - call `migrate_database()` separately.
pub async fn init_database(settings: &AppSettings) -> Result<DatabaseConnection, InternalError> {
    let mut options = ConnectOptions::new(settings.database_url());
    options
        .acquire_timeout(settings.database_timeout())
        .connect_timeout(settings.database_timeout())
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to database: {}", settings.database_url());

    Ok(db)
}

/// Run all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Database migrations completed");

    Ok(())
}
