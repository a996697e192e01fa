use crate::errors::internal::{CredentialError, DatabaseError, InternalError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Email already registered
    #[oai(status = 400)]
    DuplicateEmail(Json<ErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Persistence did not answer in time
    #[oai(status = 503)]
    Unavailable(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse::new(
            "invalid_credentials",
            "Invalid email or password",
            401,
        )))
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Json(ErrorResponse::new(
            "duplicate_email",
            "Email is already registered",
            400,
        )))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorResponse::new(
            "invalid_token",
            "Invalid or malformed JWT",
            401,
        )))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorResponse::new(
            "expired_token",
            "JWT has expired",
            401,
        )))
    }

    /// Convert InternalError to AuthError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::DuplicateEmail { .. }) => {
                tracing::warn!("Duplicate email on sign-up");
                Self::duplicate_email()
            }
            InternalError::Credential(CredentialError::InvalidToken { reason }) => {
                tracing::debug!("Invalid token: {}", reason);
                Self::invalid_token()
            }
            InternalError::Credential(CredentialError::ExpiredToken) => {
                tracing::debug!("Expired token");
                Self::expired_token()
            }
            InternalError::Database(DatabaseError::Timeout { operation, .. }) => {
                tracing::error!("Auth operation {} timed out", operation);
                Self::unavailable()
            }
            InternalError::Database(_) => {
                tracing::error!("Database error in auth operation: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            // Item errors shouldn't appear in auth context
            InternalError::Item(_) => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn unavailable() -> Self {
        AuthError::Unavailable(Json(ErrorResponse::new(
            "unavailable",
            "The service is temporarily unavailable",
            503,
        )))
    }

    /// Generic internal server error, never carries internal details
    fn internal_server_error() -> Self {
        AuthError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    /// Get the machine-readable error code
    pub fn code(&self) -> &str {
        &self.body().error
    }

    fn body(&self) -> &ErrorResponse {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::DuplicateEmail(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::Unavailable(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
