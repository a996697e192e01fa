// Test utilities shared across unit tests
// Only compiled when running tests

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::app_data::AppData;
use crate::config::{AppSettings, MockEnvironment, SecretManager};
use crate::types::db::user;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// In-memory database with migrations applied
///
/// The pool holds a single connection so every caller sees the same database.
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

/// Insert a user row directly and return its id
pub async fn seed_user(db: &DatabaseConnection, email: &str) -> String {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();

    user::ActiveModel {
        id: Set(id.clone()),
        name: Set(email.split('@').next().unwrap_or(email).to_string()),
        email: Set(email.to_string()),
        password_hash: Set("$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string()),
        status: Set("FREE".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to seed user");

    id
}

/// Settings with cheap hashing for tests
pub fn test_settings() -> AppSettings {
    let env = MockEnvironment::empty().with_vars(&[
        ("DATABASE_URL", "sqlite::memory:"),
        ("HASH_COST", "1"),
        ("HASH_MEMORY_KIB", "1024"),
        ("JWT_EXPIRES_IN", "1h"),
    ]);
    AppSettings::from_env_provider(&env).expect("Failed to build test settings")
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    Arc::new(SecretManager::from_values(TEST_JWT_SECRET, None).expect("Failed to build test secrets"))
}

/// Fully wired application over a fresh in-memory database
pub async fn setup_test_app() -> AppData {
    let db = setup_test_db().await;
    AppData::init(db, test_settings(), test_secret_manager())
        .await
        .expect("Failed to initialize AppData")
}
