//! The storage interface the calendar service depends on.

use tokio_util::sync::CancellationToken;

use crate::error::StoreResult;

/// Named text blobs in a single bucket.
///
/// Every call observes `cancel` and returns `StoreError::Cancelled` as soon
/// as it fires.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// ## Summary
    /// Stores `content` under `key` as `text/calendar`, overwriting any
    /// previous object.
    ///
    /// ## Errors
    /// Returns a transient, permanent or cancelled `StoreError`.
    async fn save(&self, key: &str, content: &str, cancel: &CancellationToken) -> StoreResult<()>;

    /// ## Summary
    /// Reads the object under `key`; `None` when it does not exist.
    ///
    /// ## Errors
    /// Returns a transient, permanent or cancelled `StoreError`.
    async fn get(&self, key: &str, cancel: &CancellationToken) -> StoreResult<Option<String>>;

    /// ## Summary
    /// Deletes the object under `key`. Returns `false` if there was none.
    ///
    /// ## Errors
    /// Returns a transient, permanent or cancelled `StoreError`.
    async fn delete(&self, key: &str, cancel: &CancellationToken) -> StoreResult<bool>;

    /// ## Summary
    /// Checks whether an object exists under `key`.
    ///
    /// ## Errors
    /// Returns a transient, permanent or cancelled `StoreError`.
    async fn exists(&self, key: &str, cancel: &CancellationToken) -> StoreResult<bool>;

    /// ## Summary
    /// Checks whether the configured bucket exists.
    ///
    /// ## Errors
    /// Returns a transient, permanent or cancelled `StoreError`.
    async fn bucket_exists(&self, cancel: &CancellationToken) -> StoreResult<bool>;
}
