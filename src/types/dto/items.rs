use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Enum, Object};
use serde::{Deserialize, Serialize};

use crate::types::internal::{Item, ItemStatus, NewItem};

/// Listing state as exposed over the API
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemState {
    OnSale,
    SoldOut,
}

impl From<ItemStatus> for ItemState {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::OnSale => ItemState::OnSale,
            ItemStatus::SoldOut => ItemState::SoldOut,
        }
    }
}

/// Request model for creating a new item
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateItemRequest {
    /// Name of the item (1-100 characters)
    #[oai(validator(min_length = 1, max_length = 100))]
    pub name: String,

    /// Price in whole currency units, at least 1
    #[oai(validator(minimum(value = "1")))]
    pub price: i64,

    /// Optional description of the item
    pub description: Option<String>,
}

impl From<CreateItemRequest> for NewItem {
    fn from(request: CreateItemRequest) -> Self {
        NewItem {
            name: request.name,
            price: request.price,
            description: request.description,
        }
    }
}

/// Response model representing an item
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Unique identifier for the item
    pub id: String,

    /// Name of the item
    pub name: String,

    pub price: i64,

    /// Optional description of the item
    pub description: Option<String>,

    pub status: ItemState,

    /// Owning user ID
    pub user_id: String,

    /// Creation time (Unix timestamp)
    pub created_at: i64,

    /// Last modification time (Unix timestamp)
    pub updated_at: i64,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            description: item.description,
            status: item.status.into(),
            user_id: item.owner_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Response for item creation
#[derive(ApiResponse, Debug)]
pub enum CreateItemResponse {
    /// Item created
    #[oai(status = 201)]
    Created(Json<ItemResponse>),
}
