#[cfg(test)]
mod tests {
    use crate::errors::AuthError;
    use crate::errors::internal::{CredentialError, DatabaseError, InternalError, ItemError};
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_converts_to_internal_server_error() {
        let db_err = DbErr::RecordNotFound("test".to_string());
        let internal_err = InternalError::database("find_user_by_email", db_err);
        let auth_err = AuthError::from_internal_error(internal_err);

        assert_eq!(auth_err.message(), "An internal error occurred");
        assert!(matches!(auth_err, AuthError::InternalError(_)));
    }

    #[test]
    fn test_crypto_error_converts_to_internal_server_error() {
        let internal_err = InternalError::crypto("argon2_init", "invalid secret");
        let auth_err = AuthError::from_internal_error(internal_err);

        assert_eq!(auth_err.message(), "An internal error occurred");
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let internal_err = InternalError::parse("uuid", "secret-detail-value");
        let auth_err = AuthError::from_internal_error(internal_err);

        assert!(!auth_err.message().contains("secret-detail-value"));
    }

    #[test]
    fn test_invalid_credentials_converts_correctly() {
        let internal_err = InternalError::Credential(CredentialError::InvalidCredentials);
        let auth_err = AuthError::from_internal_error(internal_err);

        assert_eq!(auth_err.message(), "Invalid email or password");
        assert_eq!(auth_err.code(), "invalid_credentials");
    }

    #[test]
    fn test_duplicate_email_converts_to_bad_request() {
        let internal_err = InternalError::Credential(CredentialError::duplicate_email("a@example.com"));
        let auth_err = AuthError::from_internal_error(internal_err);

        assert!(matches!(auth_err, AuthError::DuplicateEmail(_)));
        // The response never echoes which address was taken
        assert!(!auth_err.message().contains("a@example.com"));
    }

    #[test]
    fn test_invalid_token_converts_correctly() {
        let internal_err = InternalError::Credential(CredentialError::invalid_token("signature"));
        let auth_err = AuthError::from_internal_error(internal_err);

        assert_eq!(auth_err.message(), "Invalid or malformed JWT");
    }

    #[test]
    fn test_expired_token_converts_correctly() {
        let internal_err = InternalError::Credential(CredentialError::ExpiredToken);
        let auth_err = AuthError::from_internal_error(internal_err);

        assert_eq!(auth_err.message(), "JWT has expired");
    }

    #[test]
    fn test_item_error_in_auth_context_is_internal() {
        let auth_err = AuthError::from_internal_error(ItemError::not_found("item-1"));

        assert_eq!(auth_err.code(), "internal_error");
    }

    #[test]
    fn test_database_timeout_converts_to_unavailable() {
        let internal_err = InternalError::Database(DatabaseError::Timeout {
            operation: "find_user_by_email",
            timeout: std::time::Duration::from_secs(5),
        });
        let auth_err = AuthError::from_internal_error(internal_err);

        assert!(matches!(auth_err, AuthError::Unavailable(_)));
        assert_eq!(auth_err.code(), "unavailable");
    }
}
