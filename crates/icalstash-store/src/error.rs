//! Backend and store failures, and the operation they happened in.

use std::fmt;

use thiserror::Error;

/// Store operation, used to label errors and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Save,
    Get,
    Delete,
    Exists,
    BucketExists,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Get => "get",
            Self::Delete => "delete",
            Self::Exists => "exists",
            Self::BucketExists => "bucket_exists",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed call against the object backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Object or bucket not found")]
    NotFound,

    #[error("Service error (HTTP {status}{}): {message}", code_suffix(.code.as_deref()))]
    Service {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Stored object is not valid UTF-8: {0}")]
    InvalidBody(String),
}

fn code_suffix(code: Option<&str>) -> String {
    code.map(|c| format!(", {c}")).unwrap_or_default()
}

/// Service error codes that signal throttling or a transient server fault
/// regardless of the HTTP status they arrive with.
const TRANSIENT_CODES: &[&str] = &[
    "RequestTimeout",
    "SlowDown",
    "Throttling",
    "ThrottlingException",
    "InternalError",
    "ServiceUnavailable",
];

impl ClientError {
    /// Whether repeating the same call can reasonably succeed.
    ///
    /// Network failures, timeouts, 5xx, 408, 429 and throttling codes are
    /// transient. Not-found and every other 4xx are permanent.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::NotFound | Self::InvalidBody(_) => false,
            Self::Service { status, code, .. } => {
                *status >= 500
                    || matches!(*status, 408 | 429)
                    || code
                        .as_deref()
                        .is_some_and(|c| TRANSIENT_CODES.contains(&c))
            }
        }
    }
}

/// Store layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transient storage failure during {op} of {key} after {attempts} attempt(s): {source}")]
    Transient {
        op: Operation,
        key: String,
        attempts: u32,
        #[source]
        source: ClientError,
    },

    #[error("Permanent storage failure during {op} of {key}: {source}")]
    Permanent {
        op: Operation,
        key: String,
        #[source]
        source: ClientError,
    },

    #[error("Storage {op} of {key} was cancelled")]
    Cancelled { op: Operation, key: String },
}

impl StoreError {
    /// Returns the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Transient { op, .. } | Self::Permanent { op, .. } | Self::Cancelled { op, .. } => {
                *op
            }
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
