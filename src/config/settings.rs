use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::config::{EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://itemstash.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_JWT_EXPIRES_IN: &str = "1h";
const DEFAULT_HASH_COST: u32 = 2;
const DEFAULT_HASH_MEMORY_KIB: u32 = 19456;
const DEFAULT_DATABASE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Setting '{setting_name}' has invalid value '{value}': {reason}")]
    InvalidValue {
        setting_name: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(setting_name: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            setting_name: setting_name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Non-secret runtime settings, read once at startup
#[derive(Clone)]
pub struct AppSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    jwt_expires_in: Duration,
    hash_cost: u32,
    hash_memory_kib: u32,
    database_timeout: Duration,
}

impl AppSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let database_url = env
            .get_var("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let server_host = env
            .get_var("HOST")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let server_port = match env.get_var("PORT") {
            Some(value) => match value.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::invalid("PORT", &value, "expected a port in 1-65535")),
            },
            None => DEFAULT_PORT,
        };

        let expires_raw = env
            .get_var("JWT_EXPIRES_IN")
            .unwrap_or_else(|| DEFAULT_JWT_EXPIRES_IN.to_string());
        let jwt_expires_in = parse_duration(&expires_raw)
            .ok_or_else(|| ConfigError::invalid("JWT_EXPIRES_IN", &expires_raw, "expected <n>, <n>s, <n>m, <n>h or <n>d"))?;

        let hash_cost = parse_positive(env, "HASH_COST", DEFAULT_HASH_COST)?;
        let hash_memory_kib = parse_positive(env, "HASH_MEMORY_KIB", DEFAULT_HASH_MEMORY_KIB)?;
        let timeout_secs = parse_positive(env, "DATABASE_TIMEOUT_SECS", DEFAULT_DATABASE_TIMEOUT_SECS)?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            jwt_expires_in,
            hash_cost,
            hash_memory_kib,
            database_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn jwt_expires_in(&self) -> Duration {
        self.jwt_expires_in
    }

    /// Argon2 iteration count
    pub fn hash_cost(&self) -> u32 {
        self.hash_cost
    }

    pub fn hash_memory_kib(&self) -> u32 {
        self.hash_memory_kib
    }

    /// Upper bound for connection acquire and for each unit of work
    pub fn database_timeout(&self) -> Duration {
        self.database_timeout
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("jwt_expires_in", &self.jwt_expires_in)
            .field("hash_cost", &self.hash_cost)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("database_timeout", &self.database_timeout)
            .finish()
    }
}

fn parse_positive<T>(env: &dyn EnvironmentProvider, name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match env.get_var(name) {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) if parsed > T::default() => Ok(parsed),
            _ => Err(ConfigError::invalid(name, &value, "expected a positive integer")),
        },
        None => Ok(default),
    }
}

/// Parse a token lifetime such as `3600`, `90s`, `15m`, `1h` or `7d`
///
/// A bare number is seconds. Zero and unknown suffixes are rejected.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);

    let amount: u64 = digits.parse().ok()?;
    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };

    if amount == 0 {
        return None;
    }

    amount.checked_mul(multiplier).map(Duration::from_secs)
}
