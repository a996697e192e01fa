use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{AppSettings, SecretManager};
use crate::errors::InternalError;
use crate::providers::{CryptoProvider, HashParams, PasswordHasher, TokenProvider};
use crate::services::{AuthService, ItemService};
use crate::stores::{CredentialStore, DbCredentialStore, DbItemStore, ItemStore};

/// Composition root
///
/// Every store, provider and service is built once here and shared by
/// `Arc`. Services only see trait objects.
///
/// ```text
/// AppData::init(db, settings, secrets)
///   ├─ credential_store (DbCredentialStore)
///   ├─ item_store       (DbItemStore)
///   ├─ password_hasher  (CryptoProvider, argon2id)
///   ├─ token_provider   (TokenProvider, HS256)
///   ├─ auth_service     ← credential_store, password_hasher, token_provider
///   └─ item_service     ← item_store, database timeout
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: AppSettings,
    pub secret_manager: Arc<SecretManager>,
    pub credential_store: Arc<dyn CredentialStore>,
    pub item_store: Arc<dyn ItemStore>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_provider: Arc<TokenProvider>,
    pub auth_service: Arc<AuthService>,
    pub item_service: Arc<ItemService>,
}

impl AppData {
    /// Wire all components over an already migrated database
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when the hashing parameters are rejected
    pub async fn init(
        db: DatabaseConnection,
        settings: AppSettings,
        secret_manager: Arc<SecretManager>,
    ) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let credential_store: Arc<dyn CredentialStore> = Arc::new(DbCredentialStore::new(db.clone()));
        let item_store: Arc<dyn ItemStore> = Arc::new(DbItemStore::new(db.clone()));

        let hash_params = HashParams {
            cost: settings.hash_cost(),
            memory_kib: settings.hash_memory_kib(),
        };
        let password_hasher: Arc<dyn PasswordHasher> = Arc::new(CryptoProvider::new(
            hash_params,
            secret_manager.password_pepper(),
        )?);
        let token_provider = Arc::new(TokenProvider::new(
            secret_manager.clone(),
            settings.jwt_expires_in(),
        ));
        tracing::debug!("Providers created: {}", token_provider);

        let auth_service = Arc::new(
            AuthService::new(
                credential_store.clone(),
                password_hasher.clone(),
                token_provider.clone(),
                settings.database_timeout(),
            )
            .await?,
        );
        let item_service = Arc::new(ItemService::new(item_store.clone(), settings.database_timeout()));

        tracing::info!("AppData initialization complete");

        Ok(Self {
            db,
            settings,
            secret_manager,
            credential_store,
            item_store,
            password_hasher,
            token_provider,
            auth_service,
            item_service,
        })
    }
}
