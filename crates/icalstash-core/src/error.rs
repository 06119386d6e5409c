use thiserror::Error;

/// Failures shared by every icalstash crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A setting is present but unusable.
    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    /// Per-request state that a middleware should have provided is absent.
    #[error("Request context is missing {0}")]
    MissingContext(&'static str),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
