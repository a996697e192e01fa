use std::fmt;

use argon2::password_hash::{self, PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use async_trait::async_trait;
use rand::Rng;

use crate::errors::InternalError;

/// One-way adaptive password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing PHC string
    async fn hash(&self, password: &str) -> Result<String, InternalError>;

    /// Check a plaintext against a stored hash
    ///
    /// A mismatch is `Ok(false)`; only a malformed hash or a hasher fault is an error.
    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, InternalError>;
}

/// Argon2id work factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Iterations (t_cost)
    pub cost: u32,
    /// Memory in KiB (m_cost)
    pub memory_kib: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            cost: 2,
            memory_kib: 19456,
        }
    }
}

/// Argon2id hasher with an optional pepper used as the Argon2 secret parameter
///
/// Hashing is CPU-bound and runs on the blocking thread pool.
#[derive(Clone)]
pub struct CryptoProvider {
    params: Params,
    pepper: Option<Vec<u8>>,
}

impl CryptoProvider {
    pub fn new(hash_params: HashParams, pepper: Option<&str>) -> Result<Self, InternalError> {
        let params = Params::new(hash_params.memory_kib, hash_params.cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| InternalError::crypto("argon2_params", e.to_string()))?;

        Ok(Self {
            params,
            pepper: pepper.map(|p| p.as_bytes().to_vec()),
        })
    }

    fn argon2(params: Params, pepper: Option<&[u8]>) -> Result<Argon2<'_>, InternalError> {
        match pepper {
            Some(secret) => Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, params)
                .map_err(|e| InternalError::crypto("argon2_init", e.to_string())),
            None => Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)),
        }
    }
}

#[async_trait]
impl PasswordHasher for CryptoProvider {
    async fn hash(&self, password: &str) -> Result<String, InternalError> {
        let params = self.params.clone();
        let pepper = self.pepper.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut rand_core::OsRng);
            let argon2 = Self::argon2(params, pepper.as_deref())?;

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| InternalError::crypto("password_hash", e.to_string()))
        })
        .await
        .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
    }

    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, InternalError> {
        let params = self.params.clone();
        let pepper = self.pepper.clone();
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| InternalError::crypto("password_verify", format!("malformed hash: {}", e)))?;
            let argon2 = Self::argon2(params, pepper.as_deref())?;

            match argon2.verify_password(password.as_bytes(), &parsed_hash) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(InternalError::crypto("password_verify", e.to_string())),
            }
        })
        .await
        .map_err(|e| InternalError::crypto("password_verify", e.to_string()))?
    }
}

impl fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoProvider")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("pepper", &self.pepper.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Generate a random 20-character password for accounts created from the CLI
///
/// Mixes upper and lower case letters, digits and symbols.
pub fn generate_secure_password() -> String {
    const PASSWORD_LENGTH: usize = 20;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             !@#$%^&*()_+-=[]{}|;:,.<>?";

    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> HashParams {
        HashParams {
            cost: 1,
            memory_kib: 1024,
        }
    }

    #[tokio::test]
    async fn test_hash_verifies_against_original_password() {
        let provider = CryptoProvider::new(fast_params(), None).unwrap();

        let hash = provider.hash("correct horse").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct horse"));
        assert!(provider.verify("correct horse", &hash).await.unwrap());
        assert!(!provider.verify("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let provider = CryptoProvider::new(fast_params(), None).unwrap();

        let first = provider.hash("password").await.unwrap();
        let second = provider.hash("password").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_hash_records_configured_cost() {
        let provider = CryptoProvider::new(HashParams { cost: 3, memory_kib: 2048 }, None).unwrap();

        let hash = provider.hash("password").await.unwrap();

        assert!(hash.contains("m=2048,t=3"));
    }

    #[tokio::test]
    async fn test_pepper_is_required_to_verify() {
        let peppered = CryptoProvider::new(fast_params(), Some("pepper-of-16-chars")).unwrap();
        let plain = CryptoProvider::new(fast_params(), None).unwrap();

        let hash = peppered.hash("password").await.unwrap();

        assert!(peppered.verify("password", &hash).await.unwrap());
        assert!(!plain.verify("password", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let provider = CryptoProvider::new(fast_params(), None).unwrap();

        let result = provider.verify("password", "not-a-phc-string").await;

        assert!(matches!(result, Err(InternalError::Crypto { .. })));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = CryptoProvider::new(HashParams { cost: 0, memory_kib: 1024 }, None);

        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_pepper() {
        let provider = CryptoProvider::new(fast_params(), Some("pepper-of-16-chars")).unwrap();

        let output = format!("{:?}", provider);

        assert!(!output.contains("pepper-of-16-chars"));
        assert!(output.contains("<redacted>"));
    }

    #[test]
    fn test_generate_secure_password_shape() {
        let password = generate_secure_password();

        assert_eq!(password.len(), 20);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)));
        assert_ne!(password, generate_secure_password());
    }
}
