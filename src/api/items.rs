use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers::{authenticate, BearerAuth};
use crate::errors::ItemApiError;
use crate::providers::TokenVerifier;
use crate::services::ItemService;
use crate::types::dto::items::{CreateItemRequest, CreateItemResponse, ItemResponse};

/// Items API
pub struct ItemsApi {
    item_service: Arc<ItemService>,
    token_verifier: Arc<dyn TokenVerifier>,
}

impl ItemsApi {
    pub fn new(item_service: Arc<ItemService>, token_verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            item_service,
            token_verifier,
        }
    }
}

/// API tags for item endpoints
#[derive(Tags)]
enum ApiTags {
    /// Item management endpoints
    Items,
}

#[OpenApi]
impl ItemsApi {
    /// List all items
    #[oai(path = "/items", method = "get", tag = "ApiTags::Items")]
    async fn list_items(&self) -> Result<Json<Vec<ItemResponse>>, ItemApiError> {
        let items = self.item_service.find_all().await?;

        Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
    }

    /// Get a single item
    #[oai(path = "/items/:id", method = "get", tag = "ApiTags::Items")]
    async fn get_item(&self, id: Path<String>) -> Result<Json<ItemResponse>, ItemApiError> {
        let item = self.item_service.find_by_id(&id.0).await?;

        Ok(Json(ItemResponse::from(item)))
    }

    /// Create a new item owned by the caller
    #[oai(path = "/items", method = "post", tag = "ApiTags::Items")]
    async fn create_item(
        &self,
        auth: BearerAuth,
        body: Json<CreateItemRequest>,
    ) -> Result<CreateItemResponse, ItemApiError> {
        let user = authenticate(&auth, self.token_verifier.as_ref())?;
        let item = self.item_service.create(body.0.into(), &user).await?;

        Ok(CreateItemResponse::Created(Json(ItemResponse::from(item))))
    }

    /// Mark an item as sold out (owner only)
    #[oai(path = "/items/:id", method = "put", tag = "ApiTags::Items")]
    async fn update_item_status(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<ItemResponse>, ItemApiError> {
        let user = authenticate(&auth, self.token_verifier.as_ref())?;
        let item = self.item_service.update_status(&id.0, &user).await?;

        Ok(Json(ItemResponse::from(item)))
    }

    /// Delete an item (owner only)
    #[oai(path = "/items/:id", method = "delete", tag = "ApiTags::Items")]
    async fn delete_item(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<ItemResponse>, ItemApiError> {
        let user = authenticate(&auth, self.token_verifier.as_ref())?;
        let item = self.item_service.delete(&id.0, &user).await?;

        Ok(Json(ItemResponse::from(item)))
    }
}
