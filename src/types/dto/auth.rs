use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Enum, Object};
use serde::{Deserialize, Serialize};

use crate::types::internal::{IssuedToken, RequestUser, UserProfile, UserStatus};

/// Account tier as exposed over the API
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Free,
    Premium,
}

impl From<UserStatus> for AccountStatus {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Free => AccountStatus::Free,
            UserStatus::Premium => AccountStatus::Premium,
        }
    }
}

impl From<AccountStatus> for UserStatus {
    fn from(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Free => UserStatus::Free,
            AccountStatus::Premium => UserStatus::Premium,
        }
    }
}

/// Request model for account registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignUpRequest {
    /// Display name
    #[oai(validator(min_length = 1, max_length = 100))]
    pub name: String,

    /// Email address, unique across accounts
    #[oai(validator(min_length = 3, max_length = 254))]
    pub email: String,

    /// Plaintext password; only its hash is stored
    #[oai(validator(min_length = 1))]
    pub password: String,

    /// Account tier, defaults to FREE
    pub status: Option<AccountStatus>,
}

/// Request model for sign-in
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Registered email address
    pub email: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing the access token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}

impl From<IssuedToken> for TokenResponse {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token.into_inner(),
            token_type: "Bearer".to_string(),
            expires_in: token.expires_in,
        }
    }
}

/// Public user representation, never includes the password hash
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: AccountStatus,

    /// Creation time (Unix timestamp)
    pub created_at: i64,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            status: profile.status.into(),
            created_at: profile.created_at,
        }
    }
}

/// Response model for whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// User ID (UUID)
    pub user_id: String,

    /// Display name carried in the token
    pub name: String,

    /// Account tier carried in the token
    pub status: AccountStatus,
}

impl From<RequestUser> for WhoAmIResponse {
    fn from(user: RequestUser) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            status: user.status.into(),
        }
    }
}

/// Response for account registration
#[derive(ApiResponse, Debug)]
pub enum SignUpResponse {
    /// Account created
    #[oai(status = 201)]
    Created(Json<UserResponse>),
}
