//! Span-per-operation decorator for any `ObjectStore`.

use tokio_util::sync::CancellationToken;

use crate::error::StoreResult;
use crate::store::ObjectStore;

/// Wraps a store and opens one span per operation.
///
/// Spans carry the key, the content length on saves and whether the call
/// succeeded. Failures are also logged as errors inside the span.
#[derive(Debug)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S: ObjectStore> TracedStore<S> {
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped store.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn record<T>(result: &StoreResult<T>) {
    let span = tracing::Span::current();
    span.record("success", result.is_ok());
    if let Err(err) = result {
        tracing::error!(error = %err, "Storage operation failed");
    }
}

#[async_trait::async_trait]
impl<S: ObjectStore> ObjectStore for TracedStore<S> {
    #[tracing::instrument(
        name = "store.save",
        skip(self, content, cancel),
        fields(key = %key, content_length = content.len(), success = tracing::field::Empty)
    )]
    async fn save(&self, key: &str, content: &str, cancel: &CancellationToken) -> StoreResult<()> {
        let result = self.inner.save(key, content, cancel).await;
        record(&result);
        result
    }

    #[tracing::instrument(
        name = "store.get",
        skip(self, cancel),
        fields(key = %key, content_length = tracing::field::Empty, success = tracing::field::Empty)
    )]
    async fn get(&self, key: &str, cancel: &CancellationToken) -> StoreResult<Option<String>> {
        let result = self.inner.get(key, cancel).await;
        if let Ok(Some(body)) = &result {
            tracing::Span::current().record("content_length", body.len());
        }
        record(&result);
        result
    }

    #[tracing::instrument(
        name = "store.delete",
        skip(self, cancel),
        fields(key = %key, success = tracing::field::Empty)
    )]
    async fn delete(&self, key: &str, cancel: &CancellationToken) -> StoreResult<bool> {
        let result = self.inner.delete(key, cancel).await;
        record(&result);
        result
    }

    #[tracing::instrument(
        name = "store.exists",
        skip(self, cancel),
        fields(key = %key, success = tracing::field::Empty)
    )]
    async fn exists(&self, key: &str, cancel: &CancellationToken) -> StoreResult<bool> {
        let result = self.inner.exists(key, cancel).await;
        record(&result);
        result
    }

    #[tracing::instrument(
        name = "store.bucket_exists",
        skip(self, cancel),
        fields(success = tracing::field::Empty)
    )]
    async fn bucket_exists(&self, cancel: &CancellationToken) -> StoreResult<bool> {
        let result = self.inner.bucket_exists(cancel).await;
        record(&result);
        result
    }
}
