use thiserror::Error;

/// Errors raised while mapping inbound data onto the calendar model.
///
/// Every variant names the offending field so the caller can report it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Unparseable date/time in {field}: {value:?}")]
    InvalidDateTime { field: String, value: String },

    #[error("Unknown time zone in {field}: {value:?}")]
    UnknownTimeZone { field: String, value: String },

    #[error("Invalid URL in {field}: {value:?}")]
    InvalidUrl { field: String, value: String },

    #[error("Invalid property name in {field}: {value:?}")]
    InvalidPropertyName { field: String, value: String },

    #[error("Invalid value in {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl MappingError {
    /// Returns the name of the field that failed to map.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::InvalidDateTime { field, .. }
            | Self::UnknownTimeZone { field, .. }
            | Self::InvalidUrl { field, .. }
            | Self::InvalidPropertyName { field, .. }
            | Self::InvalidValue { field, .. } => field,
        }
    }
}

/// Errors raised by the encoder. A document that passed mapping never
/// produces one; seeing it means an internal invariant was broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

pub type MappingResult<T> = std::result::Result<T, MappingError>;
pub type EncodingResult<T> = std::result::Result<T, EncodingError>;
