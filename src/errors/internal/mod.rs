use thiserror::Error;

pub mod credential;
pub mod database;
pub mod item;

pub use credential::CredentialError;
pub use database::DatabaseError;
pub use item::ItemError;

/// Caller-facing classification of a failure
///
/// Every `InternalError` maps to exactly one kind. The two sign-in failure
/// causes (unknown email, wrong password) share `Authentication`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    NotFound,
    Forbidden,
    Conflict,
    Internal,
}

/// Internal error type for store, provider and service operations
///
/// Infrastructure errors (database, parse, crypto) are shared by every layer;
/// domain errors (credential, item) carry the business outcome.
/// Not exposed via API - endpoints convert through `AuthError` or `ItemApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InternalError::Credential(err) => err.kind(),
            InternalError::Item(err) => err.kind(),
            InternalError::Database(_) | InternalError::Parse { .. } | InternalError::Crypto { .. } => {
                ErrorKind::Internal
            }
        }
    }
}
