//! Object backend on S3 or an S3-compatible service (`MinIO`, Ceph, ...).

use aws_sdk_s3::Client;
use aws_sdk_s3::config::retry::RetryConfig as SdkRetryConfig;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;

use icalstash_core::config::StorageConfig;

use crate::client::ObjectClient;
use crate::error::{ClientError, ClientResult};

const CREDENTIALS_PROVIDER: &str = "icalstash-config";

/// An `ObjectClient` backed by `aws-sdk-s3`.
///
/// The SDK's own retry layer is switched off; retries belong to
/// `ResilientObjectStore` so that every attempt is counted and logged once.
#[derive(Debug, Clone)]
pub struct S3ObjectClient {
    client: Client,
    bucket: String,
}

impl S3ObjectClient {
    /// ## Summary
    /// Builds a client from storage settings.
    ///
    /// A custom endpoint without a scheme gets `https://` or `http://`
    /// according to `use_https`.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .retry_config(SdkRetryConfig::disabled())
            .force_path_style(config.force_path_style)
            .behavior_version_latest();

        if let Some(endpoint) = config.endpoint.as_deref().filter(|e| !e.is_empty()) {
            builder = builder.endpoint_url(endpoint_url(endpoint, config.use_https));
        }

        tracing::debug!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            "Created S3 client"
        );

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }
}

fn endpoint_url(endpoint: &str, use_https: bool) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else if use_https {
        format!("https://{endpoint}")
    } else {
        format!("http://{endpoint}")
    }
}

/// Maps an SDK failure onto the transient/permanent taxonomy.
///
/// Any 404 (`NoSuchKey`, `NoSuchBucket`, a bodiless `HEAD` miss) becomes
/// `ClientError::NotFound`.
fn classify<E>(err: &SdkError<E>) -> ClientError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err {
        SdkError::TimeoutError(_) => ClientError::Timeout(DisplayErrorContext(err).to_string()),
        SdkError::DispatchFailure(failure) if failure.is_timeout() => {
            ClientError::Timeout(DisplayErrorContext(err).to_string())
        }
        SdkError::ServiceError(ctx) => {
            let status = ctx.raw().status().as_u16();
            if status == 404 {
                return ClientError::NotFound;
            }
            ClientError::Service {
                status,
                code: ctx.err().code().map(str::to_string),
                message: ctx
                    .err()
                    .message()
                    .map_or_else(|| DisplayErrorContext(err).to_string(), str::to_string),
            }
        }
        SdkError::ResponseError(ctx) => {
            let status = ctx.raw().status().as_u16();
            if status == 404 {
                return ClientError::NotFound;
            }
            ClientError::Service {
                status,
                code: None,
                message: DisplayErrorContext(err).to_string(),
            }
        }
        // A request that could not be built will not build on a retry either.
        SdkError::ConstructionFailure(_) => ClientError::Service {
            status: 400,
            code: None,
            message: DisplayErrorContext(err).to_string(),
        },
        _ => ClientError::Network(DisplayErrorContext(err).to_string()),
    }
}

#[async_trait::async_trait]
impl ObjectClient for S3ObjectClient {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(&self, key: &str, body: &str, content_type: &str) -> ClientResult<()> {
        let response = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body.as_bytes().to_vec()))
            .send()
            .await
            .map_err(|e| classify(&e))?;

        tracing::debug!(key, etag = ?response.e_tag(), "S3 PutObject succeeded");
        Ok(())
    }

    async fn get_object(&self, key: &str) -> ClientResult<String> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?
            .into_bytes();

        String::from_utf8(bytes.to_vec()).map_err(|e| ClientError::InvalidBody(e.to_string()))
    }

    async fn delete_object(&self, key: &str) -> ClientResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        Ok(())
    }

    async fn head_object(&self, key: &str) -> ClientResult<()> {
        self.client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        Ok(())
    }

    async fn bucket_location(&self) -> ClientResult<()> {
        let response = self
            .client
            .get_bucket_location()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        tracing::debug!(
            bucket = %self.bucket,
            location = ?response.location_constraint(),
            "S3 bucket located"
        );
        Ok(())
    }
}
