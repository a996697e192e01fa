use sea_orm::entity::prelude::*;

use crate::errors::InternalError;
use crate::types::internal::Item;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,

    // ON_SALE | SOLD_OUT
    pub status: String,

    // Owning user; every mutating query filters on it
    pub user_id: String,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Item {
    type Error = InternalError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Item {
            status: model.status.parse()?,
            id: model.id,
            name: model.name,
            price: model.price,
            description: model.description,
            owner_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
