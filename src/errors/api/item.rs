use crate::errors::internal::{CredentialError, DatabaseError, InternalError, ItemError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Item endpoint error types
#[derive(ApiResponse, Debug)]
pub enum ItemApiError {
    /// Bearer token missing, invalid or expired
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Item belongs to another user
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Item does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Item state no longer allows the requested change
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Persistence did not answer in time
    #[oai(status = 503)]
    Unavailable(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ItemApiError {
    pub fn unauthorized() -> Self {
        ItemApiError::Unauthorized(Json(ErrorResponse::new(
            "unauthorized",
            "A valid bearer token is required",
            401,
        )))
    }

    pub fn forbidden() -> Self {
        ItemApiError::Forbidden(Json(ErrorResponse::new(
            "forbidden",
            "You can only modify your own items",
            403,
        )))
    }

    pub fn not_found(id: &str) -> Self {
        ItemApiError::NotFound(Json(ErrorResponse::new(
            "item_not_found",
            format!("Item with ID {} not found", id),
            404,
        )))
    }

    pub fn already_sold_out() -> Self {
        ItemApiError::Conflict(Json(ErrorResponse::new(
            "item_already_sold_out",
            "Item is already sold out",
            409,
        )))
    }

    pub fn concurrent_modification() -> Self {
        ItemApiError::Conflict(Json(ErrorResponse::new(
            "item_modified_concurrently",
            "Item was modified by another request, retry",
            409,
        )))
    }

    /// Convert InternalError to ItemApiError
    ///
    /// Same contract as `AuthError::from_internal_error`: domain outcomes keep
    /// their kind, infrastructure failures become a generic body.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Item(ItemError::NotFound { id }) => Self::not_found(id),
            InternalError::Item(ItemError::Forbidden { id }) => {
                tracing::warn!("Rejected mutation of item {} by non-owner", id);
                Self::forbidden()
            }
            InternalError::Item(ItemError::AlreadySoldOut { id }) => {
                tracing::debug!("Repeated transition on sold out item {}", id);
                Self::already_sold_out()
            }
            InternalError::Item(ItemError::ConcurrentModification { id }) => {
                tracing::warn!("Concurrent modification of item {}", id);
                Self::concurrent_modification()
            }
            InternalError::Credential(
                CredentialError::InvalidToken { .. } | CredentialError::ExpiredToken,
            ) => {
                tracing::debug!("Rejected bearer token: {}", err);
                Self::unauthorized()
            }
            InternalError::Database(DatabaseError::Timeout { operation, .. }) => {
                tracing::error!("Item operation {} timed out", operation);
                Self::unavailable()
            }
            _ => {
                tracing::error!("Internal error in item operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn unavailable() -> Self {
        ItemApiError::Unavailable(Json(ErrorResponse::new(
            "unavailable",
            "The service is temporarily unavailable",
            503,
        )))
    }

    fn internal_server_error() -> Self {
        ItemApiError::InternalError(Json(ErrorResponse::new(
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
            ItemApiError::Unauthorized(json)
            | ItemApiError::Forbidden(json)
            | ItemApiError::NotFound(json)
            | ItemApiError::Conflict(json)
            | ItemApiError::Unavailable(json)
            | ItemApiError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for ItemApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ItemApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
