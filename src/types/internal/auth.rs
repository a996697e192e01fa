use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::UserStatus;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Display name of the subject at issuance
    pub username: String,

    /// Account tier at issuance
    pub status: UserStatus,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Unique token id
    pub jti: String,
}

/// Acting identity resolved from a verified bearer token
///
/// Only ever built from verified claims; request bodies never supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUser {
    pub id: String,
    pub name: String,
    pub status: UserStatus,
}

impl From<Claims> for RequestUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.username,
            status: claims.status,
        }
    }
}

/// Sign-in input; never persisted
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Encoded bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<T> From<T> for AccessToken
where
    T: AsRef<str>,
{
    fn from(value: T) -> Self {
        Self(value.as_ref().to_owned())
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[access_token]")
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Result of a successful sign-in
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: AccessToken,
    pub jti: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}
