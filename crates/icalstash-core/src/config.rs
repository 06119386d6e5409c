use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{BUCKET_NAME_MAX_LEN, BUCKET_NAME_MIN_LEN};
use crate::error::{CoreError, CoreResult};

const ENV_PREFIX: &str = "ICALSTASH";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub storage: StorageConfig,
    pub retry: RetryConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    S3,
    Memory,
}

#[derive(Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    pub use_https: bool,
    pub force_path_style: bool,
}

// Credentials stay out of the startup log line.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("backend", &self.backend)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("use_https", &self.use_https)
            .field("force_path_style", &self.force_path_style)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the listen address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml` and
    /// `ICALSTASH_`-prefixed environment variables, in increasing precedence.
    /// Nested keys use `__` as separator, e.g. `ICALSTASH_STORAGE__BUCKET`.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load() -> Result<Self> {
        let settings = defaults()?
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks the invariants that deserialization alone cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidSetting` naming the first offending setting.
    pub fn validate(&self) -> CoreResult<()> {
        let bucket_len = self.storage.bucket.trim().len();
        if !(BUCKET_NAME_MIN_LEN..=BUCKET_NAME_MAX_LEN).contains(&bucket_len) {
            return Err(invalid(
                "storage.bucket",
                format!("must be {BUCKET_NAME_MIN_LEN} to {BUCKET_NAME_MAX_LEN} characters long"),
            ));
        }

        if self.storage.backend == StorageBackend::S3 {
            if self.storage.access_key.is_empty() {
                return Err(invalid("storage.access_key", "required for the s3 backend"));
            }
            if self.storage.secret_key.is_empty() {
                return Err(invalid("storage.secret_key", "required for the s3 backend"));
            }
        }

        if self.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "must be greater than zero"));
        }

        Ok(())
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidSetting {
        key,
        reason: reason.into(),
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("storage.backend", "s3")?
        .set_default("storage.region", "us-east-1")?
        .set_default("storage.use_https", true)?
        .set_default("storage.force_path_style", false)?
        .set_default("retry.max_retries", 3)?
        .set_default("retry.base_delay_ms", 1000)?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.request_timeout_secs", 30)?
        .set_default("logging.level", "info")
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config() -> Result<Settings> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
    }

    Settings::load()
}
