use poem_openapi::auth::Bearer;
use poem_openapi::SecurityScheme;

use crate::errors::InternalError;
use crate::providers::TokenVerifier;
use crate::types::internal::RequestUser;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Resolve the acting identity from a bearer token
///
/// Runs before any service call that needs an identity; nothing from the
/// request body ever contributes to the result.
pub fn authenticate(auth: &BearerAuth, verifier: &dyn TokenVerifier) -> Result<RequestUser, InternalError> {
    let user = verifier.validate(&auth.0.token)?;
    tracing::debug!("Authenticated request as {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::CredentialError;
    use crate::providers::TokenIssuer;
    use crate::test::utils::setup_test_app;
    use crate::types::internal::UserStatus;

    fn bearer(token: &str) -> BearerAuth {
        BearerAuth(Bearer {
            token: token.to_string(),
        })
    }

    #[tokio::test]
    async fn test_authenticate_valid_token() {
        let app = setup_test_app().await;
        let identity = RequestUser {
            id: "user-1".to_string(),
            name: "Alice".to_string(),
            status: UserStatus::Free,
        };
        let issued = app.token_provider.sign(&identity).unwrap();

        let user = authenticate(&bearer(issued.access_token.as_str()), app.token_provider.as_ref()).unwrap();

        assert_eq!(user, identity);
    }

    #[tokio::test]
    async fn test_authenticate_garbage_token() {
        let app = setup_test_app().await;

        let err = authenticate(&bearer("garbage"), app.token_provider.as_ref()).unwrap_err();

        assert!(matches!(err, InternalError::Credential(CredentialError::InvalidToken { .. })));
    }
}
