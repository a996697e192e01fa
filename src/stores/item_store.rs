use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::internal::DatabaseError;
use crate::errors::InternalError;
use crate::types::db::item::{self, ActiveModel, Entity as Items};
use crate::types::internal::{Item, ItemDraft, ItemPatch};

/// Persistence for items
///
/// Reads run directly against the pool; mutations go through an `ItemTransaction`.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_many(&self) -> Result<Vec<Item>, InternalError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, InternalError>;

    /// Open a unit of work
    async fn begin(&self) -> Result<Box<dyn ItemTransaction>, InternalError>;
}

/// A unit of work over items
///
/// Dropping it without calling `commit` rolls back every operation it performed.
#[async_trait]
pub trait ItemTransaction: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, InternalError>;

    async fn insert(&self, draft: ItemDraft) -> Result<Item, InternalError>;

    /// Apply `patch` only where id, owner and (if given) the expected status all match
    ///
    /// Returns `None` when no row matched; the caller decides why.
    async fn conditional_update(
        &self,
        id: &str,
        owner_id: &str,
        patch: ItemPatch,
    ) -> Result<Option<Item>, InternalError>;

    /// Delete the row only where id and owner both match, returning what was removed
    async fn conditional_delete(&self, id: &str, owner_id: &str) -> Result<Option<Item>, InternalError>;

    async fn commit(self: Box<Self>) -> Result<(), InternalError>;

    async fn rollback(self: Box<Self>) -> Result<(), InternalError>;
}

pub struct DbItemStore {
    db: DatabaseConnection,
}

impl DbItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemStore for DbItemStore {
    async fn find_many(&self) -> Result<Vec<Item>, InternalError> {
        Items::find()
            .order_by_asc(item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_items", e))?
            .into_iter()
            .map(Item::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, InternalError> {
        Items::find_by_id(id.to_owned())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_item", e))?
            .map(Item::try_from)
            .transpose()
    }

    async fn begin(&self) -> Result<Box<dyn ItemTransaction>, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        Ok(Box::new(DbItemTransaction { txn }))
    }
}

pub struct DbItemTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl ItemTransaction for DbItemTransaction {
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, InternalError> {
        Items::find_by_id(id.to_owned())
            .one(&self.txn)
            .await
            .map_err(|e| InternalError::database("find_item", e))?
            .map(Item::try_from)
            .transpose()
    }

    async fn insert(&self, draft: ItemDraft) -> Result<Item, InternalError> {
        let now = Utc::now().timestamp();

        let new_item = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(draft.name),
            price: Set(draft.price),
            description: Set(draft.description),
            status: Set(draft.status.as_str().to_string()),
            user_id: Set(draft.owner_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_item
            .insert(&self.txn)
            .await
            .map_err(|e| InternalError::database("insert_item", e))?;

        Item::try_from(model)
    }

    async fn conditional_update(
        &self,
        id: &str,
        owner_id: &str,
        patch: ItemPatch,
    ) -> Result<Option<Item>, InternalError> {
        let mut update = Items::update_many()
            .col_expr(item::Column::Status, Expr::value(patch.status.as_str()))
            .col_expr(item::Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .filter(item::Column::Id.eq(id))
            .filter(item::Column::UserId.eq(owner_id));

        if let Some(expected) = patch.expected_status {
            update = update.filter(item::Column::Status.eq(expected.as_str()));
        }

        let result = update
            .exec(&self.txn)
            .await
            .map_err(|e| InternalError::database("conditional_update_item", e))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn conditional_delete(&self, id: &str, owner_id: &str) -> Result<Option<Item>, InternalError> {
        let existing = Items::find()
            .filter(item::Column::Id.eq(id))
            .filter(item::Column::UserId.eq(owner_id))
            .one(&self.txn)
            .await
            .map_err(|e| InternalError::database("find_item", e))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let result = Items::delete_many()
            .filter(item::Column::Id.eq(id))
            .filter(item::Column::UserId.eq(owner_id))
            .exec(&self.txn)
            .await
            .map_err(|e| InternalError::database("conditional_delete_item", e))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Item::try_from(existing).map(Some)
    }

    async fn commit(self: Box<Self>) -> Result<(), InternalError> {
        self.txn
            .commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source }.into())
    }

    async fn rollback(self: Box<Self>) -> Result<(), InternalError> {
        self.txn
            .rollback()
            .await
            .map_err(|source| DatabaseError::TransactionRollback { source }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{seed_user, setup_test_db};
    use crate::types::internal::ItemStatus;

    fn draft(owner_id: &str) -> ItemDraft {
        ItemDraft {
            name: "Widget".to_string(),
            price: 100,
            description: Some("A widget".to_string()),
            status: ItemStatus::OnSale,
            owner_id: owner_id.to_string(),
        }
    }

    async fn insert_committed(store: &DbItemStore, owner_id: &str) -> Item {
        let txn = store.begin().await.unwrap();
        let item = txn.insert(draft(owner_id)).await.unwrap();
        txn.commit().await.unwrap();
        item
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = setup_test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let store = DbItemStore::new(db);

        let item = insert_committed(&store, &owner).await;

        assert_eq!(item.status, ItemStatus::OnSale);
        assert_eq!(item.owner_id, owner);
        assert_eq!(store.find_by_id(&item.id).await.unwrap(), Some(item.clone()));
        assert_eq!(store.find_many().await.unwrap(), vec![item]);
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let db = setup_test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let store = DbItemStore::new(db);

        let txn = store.begin().await.unwrap();
        let item = txn.insert(draft(&owner)).await.unwrap();
        drop(txn);

        assert!(store.find_by_id(&item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_explicit_rollback_discards_insert() {
        let db = setup_test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let store = DbItemStore::new(db);

        let txn = store.begin().await.unwrap();
        let item = txn.insert(draft(&owner)).await.unwrap();
        txn.rollback().await.unwrap();

        assert!(store.find_many().await.unwrap().iter().all(|i| i.id != item.id));
    }

    #[tokio::test]
    async fn test_conditional_update_requires_owner() {
        let db = setup_test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let other = seed_user(&db, "other@example.com").await;
        let store = DbItemStore::new(db);
        let item = insert_committed(&store, &owner).await;
        let patch = ItemPatch::transition(ItemStatus::OnSale, ItemStatus::SoldOut);

        let txn = store.begin().await.unwrap();
        assert!(txn.conditional_update(&item.id, &other, patch).await.unwrap().is_none());
        let updated = txn.conditional_update(&item.id, &owner, patch).await.unwrap().unwrap();
        txn.commit().await.unwrap();

        assert_eq!(updated.status, ItemStatus::SoldOut);
    }

    #[tokio::test]
    async fn test_conditional_update_requires_expected_status() {
        let db = setup_test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let store = DbItemStore::new(db);
        let item = insert_committed(&store, &owner).await;
        let patch = ItemPatch::transition(ItemStatus::OnSale, ItemStatus::SoldOut);

        let txn = store.begin().await.unwrap();
        assert!(txn.conditional_update(&item.id, &owner, patch).await.unwrap().is_some());
        assert!(txn.conditional_update(&item.id, &owner, patch).await.unwrap().is_none());
        txn.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_conditional_delete_requires_owner() {
        let db = setup_test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let other = seed_user(&db, "other@example.com").await;
        let store = DbItemStore::new(db);
        let item = insert_committed(&store, &owner).await;

        let txn = store.begin().await.unwrap();
        assert!(txn.conditional_delete(&item.id, &other).await.unwrap().is_none());
        let removed = txn.conditional_delete(&item.id, &owner).await.unwrap();
        txn.commit().await.unwrap();

        assert_eq!(removed, Some(item.clone()));
        assert!(store.find_by_id(&item.id).await.unwrap().is_none());
    }
}
