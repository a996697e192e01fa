use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::SecretManager;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::types::internal::{AccessToken, Claims, IssuedToken, RequestUser};

/// Signs time-limited identity claims
pub trait TokenIssuer: Send + Sync {
    fn sign(&self, identity: &RequestUser) -> Result<IssuedToken, InternalError>;
}

/// Verifies a bearer token and yields the identity it carries
pub trait TokenVerifier: Send + Sync {
    /// Expired, tampered and malformed tokens all fail with a credential error
    fn validate(&self, token: &str) -> Result<RequestUser, InternalError>;
}

/// HS256 JWT issuer and verifier
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    expires_in: Duration,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>, expires_in: Duration) -> Self {
        Self {
            secret_manager,
            expires_in,
        }
    }

    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }

    fn classify(err: jsonwebtoken::errors::Error) -> InternalError {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => {
                tracing::debug!("Rejected expired token");
                CredentialError::ExpiredToken.into()
            }
            JwtErrorKind::InvalidSignature => {
                tracing::warn!("Rejected token with invalid signature");
                CredentialError::invalid_token("invalid signature").into()
            }
            other => {
                tracing::debug!("Rejected malformed token: {:?}", other);
                CredentialError::invalid_token("malformed").into()
            }
        }
    }
}

impl TokenIssuer for TokenProvider {
    fn sign(&self, identity: &RequestUser) -> Result<IssuedToken, InternalError> {
        let expires_in = i64::try_from(self.expires_in.as_secs())
            .map_err(|e| InternalError::parse("token_expiry", e.to_string()))?;
        let now = Utc::now().timestamp();
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: identity.id.clone(),
            username: identity.name.clone(),
            status: identity.status,
            iat: now,
            exp: now + expires_in,
            jti: jti.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))?;

        tracing::debug!("Issued token {} for user {}", jti, identity.id);

        Ok(IssuedToken {
            access_token: AccessToken::from(token),
            jti,
            expires_in,
        })
    }
}

impl TokenVerifier for TokenProvider {
    fn validate(&self, token: &str) -> Result<RequestUser, InternalError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &Self::validation(),
        )
        .map_err(Self::classify)?;

        Ok(RequestUser::from(token_data.claims))
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("secret_manager", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl fmt::Display for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenProvider {{ expires_in: {}s }}", self.expires_in.as_secs())
    }
}
