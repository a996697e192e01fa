use std::fmt;

use thiserror::Error;

use crate::config::{EnvironmentProvider, SecretConfig, SystemEnvironment};

pub const JWT_SECRET_MIN_LENGTH: usize = 32;
pub const PASSWORD_PEPPER_MIN_LENGTH: usize = 16;

/// Secret loading failures; all of them are fatal at startup
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Signing secret and optional password pepper, loaded once
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: Option<String>,
}

impl SecretManager {
    /// Load secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    /// Load and validate all secrets from the given provider
    ///
    /// # Errors
    /// Returns `SecretError` if `JWT_SECRET` is missing or any secret is too short
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let jwt_config = Self::jwt_config();
        let jwt_secret = Self::load_secret(env, &jwt_config)?.ok_or_else(|| SecretError::Missing {
            secret_name: jwt_config.name().to_string(),
        })?;
        let password_pepper = Self::load_secret(env, &Self::pepper_config())?;

        Self::from_values(jwt_secret, password_pepper)
    }

    /// Build from already-known values, applying the same length rules
    pub fn from_values(
        jwt_secret: impl Into<String>,
        password_pepper: Option<String>,
    ) -> Result<Self, SecretError> {
        let jwt_secret = jwt_secret.into();
        Self::check_length(&Self::jwt_config(), &jwt_secret)?;
        if let Some(pepper) = &password_pepper {
            Self::check_length(&Self::pepper_config(), pepper)?;
        }

        Ok(Self {
            jwt_secret,
            password_pepper,
        })
    }

    fn jwt_config() -> SecretConfig {
        SecretConfig::env_var("JWT_SECRET")
            .required(true)
            .min_length(JWT_SECRET_MIN_LENGTH)
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::env_var("PASSWORD_PEPPER")
            .required(false)
            .min_length(PASSWORD_PEPPER_MIN_LENGTH)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Argon2 secret parameter, when configured
    pub fn password_pepper(&self) -> Option<&str> {
        self.password_pepper.as_deref()
    }

    fn load_secret(
        env: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<Option<String>, SecretError> {
        match env.get_var(config.name()).filter(|v| !v.is_empty()) {
            Some(value) => Ok(Some(value)),
            None if config.required => Err(SecretError::Missing {
                secret_name: config.name().to_string(),
            }),
            None => Ok(None),
        }
    }

    fn check_length(config: &SecretConfig, value: &str) -> Result<(), SecretError> {
        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::InvalidLength {
                    secret_name: config.name().to_string(),
                    expected: min_len,
                    actual: value.len(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded = 1 + usize::from(self.password_pepper.is_some());
        write!(f, "SecretManager {{ secrets_loaded: {} }}", loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const VALID_JWT_SECRET: &str = "this-is-a-valid-jwt-secret-with-32-characters";

    #[test]
    fn test_loads_jwt_secret_without_pepper() {
        let env = MockEnvironment::empty().with_var("JWT_SECRET", VALID_JWT_SECRET);

        let manager = SecretManager::from_env_provider(&env).unwrap();

        assert_eq!(manager.jwt_secret(), VALID_JWT_SECRET);
        assert_eq!(manager.password_pepper(), None);
    }

    #[test]
    fn test_loads_pepper_when_present() {
        let env = MockEnvironment::empty().with_vars(&[
            ("JWT_SECRET", VALID_JWT_SECRET),
            ("PASSWORD_PEPPER", "valid-pepper-16ch"),
        ]);

        let manager = SecretManager::from_env_provider(&env).unwrap();

        assert_eq!(manager.password_pepper(), Some("valid-pepper-16ch"));
    }

    #[test]
    fn test_missing_jwt_secret_is_fatal() {
        let result = SecretManager::from_env_provider(&MockEnvironment::empty());

        assert!(matches!(
            result,
            Err(SecretError::Missing { ref secret_name }) if secret_name == "JWT_SECRET"
        ));
    }

    #[test]
    fn test_empty_jwt_secret_counts_as_missing() {
        let env = MockEnvironment::empty().with_var("JWT_SECRET", "");

        assert!(matches!(
            SecretManager::from_env_provider(&env),
            Err(SecretError::Missing { .. })
        ));
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let env = MockEnvironment::empty().with_var("JWT_SECRET", "too-short");

        match SecretManager::from_env_provider(&env) {
            Err(SecretError::InvalidLength {
                secret_name,
                expected,
                actual,
            }) => {
                assert_eq!(secret_name, "JWT_SECRET");
                assert_eq!(expected, 32);
                assert_eq!(actual, 9);
            }
            other => panic!("Expected InvalidLength, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_env_and_direct_values_agree() {
        let env = MockEnvironment::empty().with_var("JWT_SECRET", VALID_JWT_SECRET);

        let from_env = SecretManager::from_env_provider(&env).unwrap();
        let direct = SecretManager::from_values(VALID_JWT_SECRET, None).unwrap();

        assert_eq!(from_env.jwt_secret(), direct.jwt_secret());
        assert_eq!(from_env.password_pepper(), direct.password_pepper());
    }

    #[test]
    fn test_short_pepper_rejected() {
        let env = MockEnvironment::empty().with_vars(&[
            ("JWT_SECRET", VALID_JWT_SECRET),
            ("PASSWORD_PEPPER", "short"),
        ]);

        assert!(matches!(
            SecretManager::from_env_provider(&env),
            Err(SecretError::InvalidLength { ref secret_name, .. }) if secret_name == "PASSWORD_PEPPER"
        ));
    }

    #[test]
    fn test_debug_and_display_redact_secrets() {
        let manager =
            SecretManager::from_values(VALID_JWT_SECRET, Some("valid-pepper-16ch".to_string())).unwrap();

        let debug_output = format!("{:?}", manager);
        let display_output = format!("{}", manager);

        assert!(!debug_output.contains(VALID_JWT_SECRET));
        assert!(!debug_output.contains("valid-pepper-16ch"));
        assert_eq!(debug_output.matches("<redacted>").count(), 2);
        assert_eq!(display_output, "SecretManager { secrets_loaded: 2 }");
    }
}
