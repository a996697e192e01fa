use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::internal::ItemError;
use crate::errors::InternalError;
use crate::stores::{ItemStore, ItemTransaction};
use crate::types::internal::{Item, ItemDraft, ItemPatch, ItemStatus, NewItem, RequestUser};

/// Item lifecycle with single-owner mutation rights
///
/// Every mutation runs as one unit of work bounded by `timeout`. The write
/// itself carries the id/owner predicate; the read before it only picks the
/// error to report.
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    timeout: Duration,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn find_all(&self) -> Result<Vec<Item>, InternalError> {
        self.bounded("find_items", self.store.find_many()).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Item, InternalError> {
        self.bounded("find_item", self.store.find_by_id(id))
            .await?
            .ok_or_else(|| ItemError::not_found(id))
    }

    /// Insert a new ON_SALE item owned by `caller`
    pub async fn create(&self, item: NewItem, caller: &RequestUser) -> Result<Item, InternalError> {
        let item = self
            .bounded("create_item", async {
                let txn = self.store.begin().await?;
                let result = txn.insert(ItemDraft::on_sale(item, caller.id.as_str())).await;
                Self::finish(txn, result).await
            })
            .await?;

        tracing::info!("User {} created item {}", caller.id, item.id);

        Ok(item)
    }

    /// Transition ON_SALE -> SOLD_OUT
    ///
    /// # Errors
    /// NotFound, Forbidden for a non-owner, AlreadySoldOut on a repeated
    /// transition, ConcurrentModification if the row changed under us.
    pub async fn update_status(&self, id: &str, caller: &RequestUser) -> Result<Item, InternalError> {
        let item = self
            .bounded("update_item_status", async {
                let txn = self.store.begin().await?;
                let result = Self::mark_sold_out(txn.as_ref(), id, &caller.id).await;
                Self::finish(txn, result).await
            })
            .await?;

        tracing::info!("User {} marked item {} as {}", caller.id, item.id, item.status);

        Ok(item)
    }

    /// Remove an item owned by `caller`, from either status
    pub async fn delete(&self, id: &str, caller: &RequestUser) -> Result<Item, InternalError> {
        let item = self
            .bounded("delete_item", async {
                let txn = self.store.begin().await?;
                let result = Self::remove(txn.as_ref(), id, &caller.id).await;
                Self::finish(txn, result).await
            })
            .await?;

        tracing::info!("User {} deleted item {}", caller.id, item.id);

        Ok(item)
    }

    async fn mark_sold_out(txn: &dyn ItemTransaction, id: &str, caller_id: &str) -> Result<Item, InternalError> {
        let current = txn.find_by_id(id).await?.ok_or_else(|| ItemError::not_found(id))?;
        Self::check_owner(&current, caller_id)?;
        if current.status == ItemStatus::SoldOut {
            tracing::debug!("Item {} already sold out", id);
            return Err(ItemError::already_sold_out(id));
        }

        let patch = ItemPatch::transition(ItemStatus::OnSale, ItemStatus::SoldOut);
        match txn.conditional_update(id, caller_id, patch).await? {
            Some(item) => Ok(item),
            None => Err(Self::classify_missed_write(txn, id, caller_id, true).await),
        }
    }

    async fn remove(txn: &dyn ItemTransaction, id: &str, caller_id: &str) -> Result<Item, InternalError> {
        let current = txn.find_by_id(id).await?.ok_or_else(|| ItemError::not_found(id))?;
        Self::check_owner(&current, caller_id)?;

        match txn.conditional_delete(id, caller_id).await? {
            Some(item) => Ok(item),
            None => Err(Self::classify_missed_write(txn, id, caller_id, false).await),
        }
    }

    fn check_owner(item: &Item, caller_id: &str) -> Result<(), InternalError> {
        if item.owner_id != caller_id {
            tracing::warn!("User {} attempted to modify item {} owned by another user", caller_id, item.id);
            return Err(ItemError::forbidden(&item.id));
        }
        Ok(())
    }

    /// Explain why a guarded write matched no row, from the row as it is now
    async fn classify_missed_write(
        txn: &dyn ItemTransaction,
        id: &str,
        caller_id: &str,
        status_guarded: bool,
    ) -> InternalError {
        match txn.find_by_id(id).await {
            Err(err) => err,
            Ok(None) => ItemError::not_found(id),
            Ok(Some(item)) if item.owner_id != caller_id => ItemError::forbidden(id),
            Ok(Some(item)) if status_guarded && item.status == ItemStatus::SoldOut => {
                ItemError::already_sold_out(id)
            }
            Ok(Some(_)) => ItemError::concurrent_modification(id),
        }
    }

    /// Commit on success, roll back on failure
    async fn finish<T>(
        txn: Box<dyn ItemTransaction>,
        result: Result<T, InternalError>,
    ) -> Result<T, InternalError> {
        match result {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Rollback failed after {}: {}", err, rollback_err);
                }
                Err(err)
            }
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, work: F) -> Result<T, InternalError>
    where
        F: Future<Output = Result<T, InternalError>>,
    {
        super::bounded(operation, self.timeout, work).await
    }
}
