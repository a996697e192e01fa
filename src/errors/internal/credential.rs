use thiserror::Error;

use super::ErrorKind;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown email or wrong password; deliberately not split
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Expired token")]
    ExpiredToken,
}

impl CredentialError {
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail { email: email.into() }
    }

    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken { reason: reason.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CredentialError::DuplicateEmail { .. } => ErrorKind::Validation,
            CredentialError::InvalidCredentials
            | CredentialError::InvalidToken { .. }
            | CredentialError::ExpiredToken => ErrorKind::Authentication,
        }
    }
}
