// Common test utilities for integration tests

use std::sync::Arc;

use itemstash_backend::api::build_app;
use itemstash_backend::app_data::AppData;
use itemstash_backend::config::{AppSettings, MockEnvironment, SecretManager};
use migration::{Migrator, MigratorTrait};
use poem::test::TestClient;
use poem::Route;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub const TEST_JWT_SECRET: &str = "integration-secret-key-minimum-32-chars";

/// Creates an in-memory database with migrations applied
///
/// Single connection so that every component shares the same database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Settings with cheap hashing and a short token lifetime
pub fn test_settings() -> AppSettings {
    let env = MockEnvironment::empty().with_vars(&[
        ("HASH_COST", "1"),
        ("HASH_MEMORY_KIB", "1024"),
        ("JWT_EXPIRES_IN", "15m"),
    ]);
    AppSettings::from_env_provider(&env).expect("Failed to build settings")
}

/// Fully wired application over a fresh database
pub async fn setup_app() -> AppData {
    let secret_manager = Arc::new(
        SecretManager::from_values(TEST_JWT_SECRET, Some("integration-pepper-16".to_string()))
            .expect("Failed to build secrets"),
    );

    AppData::init(setup_test_db().await, test_settings(), secret_manager)
        .await
        .expect("Failed to initialize AppData")
}

/// HTTP client over the full route tree
#[allow(dead_code)]
pub fn test_client(app: &AppData) -> TestClient<Route> {
    TestClient::new(build_app(app, "http://localhost:3000/api"))
}
