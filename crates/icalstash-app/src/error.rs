use salvo::http::StatusCode;
use thiserror::Error;

use icalstash_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    CoreError(#[from] icalstash_core::error::CoreError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl AppError {
    /// ## Summary
    /// Maps the error onto the status code returned to the caller.
    ///
    /// Invalid input is a 400, a request whose deadline cancelled storage is
    /// a 504, and everything else is a 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::ServiceError(ServiceError::MappingError(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::ServiceError(ServiceError::StoreError(e)) if e.is_cancelled() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            Self::ServiceError(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
