mod database;
mod env_provider;
mod logging;
mod secret_config;
mod secret_manager;
mod settings;

pub use database::{init_database, migrate_database};
pub use env_provider::{EnvironmentProvider, MockEnvironment, SystemEnvironment};
pub use logging::{init_logging, LoggingError};
pub use secret_config::{SecretConfig, SecretType};
pub use secret_manager::{SecretError, SecretManager};
pub use settings::{parse_duration, AppSettings, ConfigError};
