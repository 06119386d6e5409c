//! Retrying `ObjectStore` over a raw `ObjectClient`.

use tokio_util::sync::CancellationToken;

use icalstash_core::constants::ICS_CONTENT_TYPE;

use crate::client::ObjectClient;
use crate::error::{ClientError, Operation, StoreResult};
use crate::retry::RetryPolicy;
use crate::store::ObjectStore;

/// An `ObjectStore` that retries transient client failures.
///
/// Every client call goes through the same `RetryPolicy`. Not-found answers
/// are results, not failures: they end the call immediately.
#[derive(Debug)]
pub struct ResilientObjectStore<C> {
    client: C,
    policy: RetryPolicy,
}

impl<C: ObjectClient> ResilientObjectStore<C> {
    #[must_use]
    pub fn new(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Returns the wrapped client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    async fn head(&self, op: Operation, key: &str, cancel: &CancellationToken) -> StoreResult<bool> {
        let client = &self.client;
        self.policy
            .run(op, key, cancel, move || async move {
                match client.head_object(key).await {
                    Ok(()) => Ok(true),
                    Err(ClientError::NotFound) => Ok(false),
                    Err(e) => Err(e),
                }
            })
            .await
    }
}

#[async_trait::async_trait]
impl<C: ObjectClient> ObjectStore for ResilientObjectStore<C> {
    async fn save(&self, key: &str, content: &str, cancel: &CancellationToken) -> StoreResult<()> {
        let client = &self.client;
        self.policy
            .run(Operation::Save, key, cancel, move || async move {
                client.put_object(key, content, ICS_CONTENT_TYPE).await
            })
            .await?;

        tracing::info!(key, bucket = client.bucket(), "Calendar saved");
        Ok(())
    }

    async fn get(&self, key: &str, cancel: &CancellationToken) -> StoreResult<Option<String>> {
        let client = &self.client;
        let found = self
            .policy
            .run(Operation::Get, key, cancel, move || async move {
                match client.get_object(key).await {
                    Ok(body) => Ok(Some(body)),
                    Err(ClientError::NotFound) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await?;

        if found.is_none() {
            tracing::debug!(key, "Object not found");
        }
        Ok(found)
    }

    async fn delete(&self, key: &str, cancel: &CancellationToken) -> StoreResult<bool> {
        // S3 reports success for a missing key, so existence is checked first.
        if !self.head(Operation::Delete, key, cancel).await? {
            return Ok(false);
        }

        let client = &self.client;
        self.policy
            .run(Operation::Delete, key, cancel, move || async move {
                client.delete_object(key).await
            })
            .await?;

        tracing::info!(key, "Calendar deleted");
        Ok(true)
    }

    async fn exists(&self, key: &str, cancel: &CancellationToken) -> StoreResult<bool> {
        self.head(Operation::Exists, key, cancel).await
    }

    async fn bucket_exists(&self, cancel: &CancellationToken) -> StoreResult<bool> {
        let client = &self.client;
        self.policy
            .run(Operation::BucketExists, client.bucket(), cancel, move || async move {
                match client.bucket_location().await {
                    Ok(()) => Ok(true),
                    Err(ClientError::NotFound) => Ok(false),
                    Err(e) => Err(e),
                }
            })
            .await
    }
}
