// Services layer - Business logic and orchestration
pub mod auth_service;
pub mod item_service;

pub use auth_service::AuthService;
pub use item_service::ItemService;

use std::future::Future;
use std::time::Duration;

use crate::errors::internal::DatabaseError;
use crate::errors::InternalError;

/// Run `work` under `timeout`
///
/// On expiry the future is dropped, which drops any open transaction and
/// rolls it back.
pub(crate) async fn bounded<T, F>(operation: &'static str, timeout: Duration, work: F) -> Result<T, InternalError>
where
    F: Future<Output = Result<T, InternalError>>,
{
    match tokio::time::timeout(timeout, work).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("{} timed out after {:?}", operation, timeout);
            Err(DatabaseError::Timeout { operation, timeout }.into())
        }
    }
}
