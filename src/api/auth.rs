use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::helpers::{authenticate, BearerAuth};
use crate::errors::AuthError;
use crate::providers::TokenVerifier;
use crate::services::AuthService;
use crate::types::dto::auth::{
    SignInRequest, SignUpRequest, SignUpResponse, TokenResponse, UserResponse, WhoAmIResponse,
};
use crate::types::internal::{Credentials, NewUser};

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
    token_verifier: Arc<dyn TokenVerifier>,
}

impl AuthApi {
    pub fn new(auth_service: Arc<AuthService>, token_verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            auth_service,
            token_verifier,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account
    #[oai(path = "/signup", method = "post", tag = "AuthTags::Authentication")]
    async fn signup(&self, body: Json<SignUpRequest>) -> Result<SignUpResponse, AuthError> {
        let body = body.0;
        let profile = self
            .auth_service
            .create_user(NewUser {
                name: body.name,
                email: body.email,
                password: body.password,
                status: body.status.map(Into::into).unwrap_or_default(),
            })
            .await?;

        Ok(SignUpResponse::Created(Json(UserResponse::from(profile))))
    }

    /// Sign in with email and password to receive an access token
    #[oai(path = "/signin", method = "post", tag = "AuthTags::Authentication")]
    async fn signin(&self, body: Json<SignInRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let body = body.0;
        let issued = self
            .auth_service
            .sign_in(Credentials {
                email: body.email,
                password: body.password,
            })
            .await?;

        Ok(Json(TokenResponse::from(issued)))
    }

    /// Verify JWT and return the identity it carries
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let user = authenticate(&auth, self.token_verifier.as_ref())?;

        Ok(Json(WhoAmIResponse::from(user)))
    }
}
