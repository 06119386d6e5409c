//! Store construction from configuration.

use std::sync::Arc;

use icalstash_core::config::{Settings, StorageBackend};
use icalstash_store::memory::MemoryObjectClient;
use icalstash_store::s3::S3ObjectClient;
use icalstash_store::{ObjectClient, ObjectStore, ResilientObjectStore, RetryPolicy, TracedStore};

/// ## Summary
/// Builds the configured backend wrapped in retries and tracing.
#[must_use]
pub fn build_store(settings: &Settings) -> Arc<dyn ObjectStore> {
    let policy = RetryPolicy::from(&settings.retry);

    match settings.storage.backend {
        StorageBackend::S3 => layered(S3ObjectClient::new(&settings.storage), policy),
        StorageBackend::Memory => {
            tracing::warn!(
                bucket = %settings.storage.bucket,
                "Using in-memory storage; calendars do not survive a restart"
            );
            layered(MemoryObjectClient::new(settings.storage.bucket.clone()), policy)
        }
    }
}

fn layered<C: ObjectClient + 'static>(client: C, policy: RetryPolicy) -> Arc<dyn ObjectStore> {
    Arc::new(TracedStore::new(ResilientObjectStore::new(client, policy)))
}
