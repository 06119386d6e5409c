//! Calendar save/read/delete pipeline.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use icalstash_core::constants::ICS_EXTENSION;
use icalstash_rfc::error::MappingError;
use icalstash_rfc::rfc::ical::build::encode;
use icalstash_store::ObjectStore;

use super::translate::translate;
use crate::error::{ServiceError, ServiceResult};
use crate::request::EventsRequest;

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCalendar {
    /// Object key the document was written under.
    pub key: String,
    /// Size of the encoded document in octets.
    pub content_length: usize,
    pub events: usize,
}

/// Turns requests into stored iCalendar documents.
#[derive(Clone)]
pub struct CalendarService {
    store: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for CalendarService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarService").finish_non_exhaustive()
    }
}

impl CalendarService {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// ## Summary
    /// Translates, encodes and stores a calendar under `<calendar_id>.ics`,
    /// replacing any previous version.
    ///
    /// ## Side Effects
    /// One object write (plus retries) when translation and encoding succeed;
    /// nothing otherwise.
    ///
    /// ## Errors
    /// - `ServiceError::MappingError` for an invalid request; the store is not called
    /// - `ServiceError::EncodingError` if the encoder rejects the document
    /// - `ServiceError::StoreError` if persisting fails or is cancelled
    #[tracing::instrument(skip(self, request, cancel), fields(
        calendar_id = %request.calendar_id,
        events = request.events.len()
    ))]
    pub async fn save_events(
        &self,
        request: &EventsRequest,
        cancel: &CancellationToken,
    ) -> ServiceResult<SavedCalendar> {
        tracing::debug!("Processing save request");

        let doc = translate(request)?;
        let content = encode(&doc)?;
        let key = doc.storage_key();

        self.store.save(&key, &content, cancel).await?;

        tracing::info!(key = %key, octets = content.len(), "Calendar stored");

        Ok(SavedCalendar {
            key,
            content_length: content.len(),
            events: doc.events.len(),
        })
    }

    /// ## Summary
    /// Returns the stored document for `calendar_id`, if any.
    ///
    /// ## Errors
    /// Returns `ServiceError::MappingError` for an empty id and
    /// `ServiceError::StoreError` if the read fails.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn get_calendar(
        &self,
        calendar_id: &str,
        cancel: &CancellationToken,
    ) -> ServiceResult<Option<String>> {
        let key = storage_key(calendar_id)?;
        Ok(self.store.get(&key, cancel).await?)
    }

    /// ## Summary
    /// Deletes the stored document for `calendar_id`. Returns `false` if
    /// there was none.
    ///
    /// ## Errors
    /// Returns `ServiceError::MappingError` for an empty id and
    /// `ServiceError::StoreError` if the delete fails.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn delete_calendar(
        &self,
        calendar_id: &str,
        cancel: &CancellationToken,
    ) -> ServiceResult<bool> {
        let key = storage_key(calendar_id)?;
        Ok(self.store.delete(&key, cancel).await?)
    }

    /// ## Summary
    /// Checks whether a document is stored for `calendar_id`.
    ///
    /// ## Errors
    /// Returns `ServiceError::MappingError` for an empty id and
    /// `ServiceError::StoreError` if the check fails.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn calendar_exists(
        &self,
        calendar_id: &str,
        cancel: &CancellationToken,
    ) -> ServiceResult<bool> {
        let key = storage_key(calendar_id)?;
        Ok(self.store.exists(&key, cancel).await?)
    }

    /// ## Summary
    /// Fails unless the configured bucket exists. Run once at startup.
    ///
    /// ## Errors
    /// Returns `ServiceError::BucketNotFound` for a missing bucket and
    /// `ServiceError::StoreError` if the lookup itself fails.
    #[tracing::instrument(skip_all)]
    pub async fn verify_bucket(&self, cancel: &CancellationToken) -> ServiceResult<()> {
        if self.store.bucket_exists(cancel).await? {
            tracing::info!("Storage bucket verified");
            Ok(())
        } else {
            Err(ServiceError::BucketNotFound)
        }
    }
}

/// The id is the key stem as given; only a blank id is refused.
fn storage_key(calendar_id: &str) -> ServiceResult<String> {
    if calendar_id.trim().is_empty() {
        return Err(MappingError::MissingField {
            field: "calendar_id".to_string(),
        }
        .into());
    }
    Ok(format!("{calendar_id}{ICS_EXTENSION}"))
}
