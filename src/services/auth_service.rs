use std::sync::Arc;
use std::time::Duration;

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::{generate_secure_password, PasswordHasher, TokenIssuer};
use crate::services::bounded;
use crate::stores::CredentialStore;
use crate::types::internal::{Credentials, IssuedToken, NewUser, RequestUser, UserDraft, UserProfile};

/// Sign-up and sign-in orchestration
///
/// Holds a hash of a random throwaway password so that sign-in against an
/// unknown email still performs one full verification. Store calls are
/// bounded by `timeout`.
pub struct AuthService {
    credential_store: Arc<dyn CredentialStore>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    dummy_hash: String,
    timeout: Duration,
}

impl AuthService {
    pub async fn new(
        credential_store: Arc<dyn CredentialStore>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
        timeout: Duration,
    ) -> Result<Self, InternalError> {
        let dummy_hash = password_hasher.hash(&generate_secure_password()).await?;

        Ok(Self {
            credential_store,
            password_hasher,
            token_issuer,
            dummy_hash,
            timeout,
        })
    }

    /// Hash the password and persist the account
    ///
    /// # Errors
    /// `CredentialError::DuplicateEmail` when the email is taken
    pub async fn create_user(&self, new_user: NewUser) -> Result<UserProfile, InternalError> {
        let password_hash = self.password_hasher.hash(&new_user.password).await?;

        let draft = UserDraft {
            name: new_user.name,
            email: new_user.email,
            password_hash,
            status: new_user.status,
        };
        let user = bounded("insert_user", self.timeout, self.credential_store.insert(draft)).await?;

        tracing::info!("Created user {} ({})", user.id, user.status);

        Ok(UserProfile::from(user))
    }

    /// Verify credentials and issue a bearer token
    ///
    /// Unknown email and wrong password both fail with
    /// `CredentialError::InvalidCredentials`.
    pub async fn sign_in(&self, credentials: Credentials) -> Result<IssuedToken, InternalError> {
        let user = bounded(
            "find_user_by_email",
            self.timeout,
            self.credential_store.find_by_email(&credentials.email),
        )
        .await?;

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(self.dummy_hash.as_str());
        // A stored hash that cannot be checked rejects like a wrong password
        let password_matches = match self.password_hasher.verify(&credentials.password, stored_hash).await {
            Ok(matches) => matches,
            Err(err) => {
                tracing::error!("Password verification failed: {}", err);
                false
            }
        };

        let user = match user {
            Some(user) if password_matches => user,
            _ => {
                tracing::debug!("Sign-in rejected");
                return Err(CredentialError::InvalidCredentials.into());
            }
        };

        let identity = RequestUser {
            id: user.id,
            name: user.name,
            status: user.status,
        };
        let token = self.token_issuer.sign(&identity)?;

        tracing::info!("User {} signed in", identity.id);

        Ok(token)
    }
}
