//! In-process object backend for local development and tests.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::client::ObjectClient;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredObject {
    body: String,
    content_type: String,
}

/// An `ObjectClient` that keeps objects in a map. The bucket always exists.
#[derive(Debug, Default)]
pub struct MemoryObjectClient {
    bucket: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryObjectClient {
    #[must_use]
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Removes every object.
    pub async fn clear(&self) {
        self.objects.write().await.clear();
    }

    /// Returns a copy of every key and body currently stored.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.objects
            .read()
            .await
            .iter()
            .map(|(key, object)| (key.clone(), object.body.clone()))
            .collect()
    }

    /// Returns the content type an object was stored with.
    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|object| object.content_type.clone())
    }
}

#[async_trait::async_trait]
impl ObjectClient for MemoryObjectClient {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(&self, key: &str, body: &str, content_type: &str) -> ClientResult<()> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                body: body.to_string(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get_object(&self, key: &str) -> ClientResult<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|object| object.body.clone())
            .ok_or(ClientError::NotFound)
    }

    async fn delete_object(&self, key: &str) -> ClientResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn head_object(&self, key: &str) -> ClientResult<()> {
        if self.objects.read().await.contains_key(key) {
            Ok(())
        } else {
            Err(ClientError::NotFound)
        }
    }

    async fn bucket_location(&self) -> ClientResult<()> {
        Ok(())
    }
}
