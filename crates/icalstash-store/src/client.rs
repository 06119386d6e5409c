//! The raw object backend seam.

use crate::error::ClientResult;

/// Raw access to one bucket of an object backend.
///
/// Implementations make exactly one backend call per method and report
/// failures as `ClientError` without retrying. A missing object or bucket is
/// always `ClientError::NotFound`.
#[async_trait::async_trait]
pub trait ObjectClient: Send + Sync {
    /// Name of the bucket every call targets.
    fn bucket(&self) -> &str;

    /// Writes `body` under `key`, replacing any existing object.
    async fn put_object(&self, key: &str, body: &str, content_type: &str) -> ClientResult<()>;

    /// Reads the object stored under `key`.
    async fn get_object(&self, key: &str) -> ClientResult<String>;

    /// Removes the object under `key`. Removing a missing object succeeds.
    async fn delete_object(&self, key: &str) -> ClientResult<()>;

    /// Checks that an object exists under `key` without reading it.
    async fn head_object(&self, key: &str) -> ClientResult<()>;

    /// Looks the bucket up; fails with `NotFound` when it does not exist.
    async fn bucket_location(&self) -> ClientResult<()>;
}
