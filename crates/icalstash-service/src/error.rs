use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    MappingError(#[from] icalstash_rfc::error::MappingError),

    #[error(transparent)]
    EncodingError(#[from] icalstash_rfc::error::EncodingError),

    #[error(transparent)]
    StoreError(#[from] icalstash_store::error::StoreError),

    #[error("Configured storage bucket does not exist")]
    BucketNotFound,
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
