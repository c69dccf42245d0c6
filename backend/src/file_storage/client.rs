//! Storage client interface and its S3 implementation

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::SdkError,
    operation::{get_object::GetObjectError, head_object::HeadObjectError},
    presigning::PresigningConfig,
    primitives::ByteStream,
    Client as S3Client,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{StorageError, StorageResult};

/// Parameters for writing a single object
#[derive(Debug, Clone)]
pub struct PutObjectParams {
    /// Destination object key
    pub key: String,
    /// Declared content type of the body
    pub content_type: String,
    /// Full object body
    pub body: Vec<u8>,
}

/// One entry from a bucket listing
#[derive(Debug, Clone)]
pub struct ObjectEntry {
    /// Object key
    pub key: String,
    /// Size in bytes
    pub size: i64,
    /// Last modification time, if the backend reported one
    pub last_modified: Option<DateTime<Utc>>,
}

/// Backend-agnostic object storage operations
///
/// Each method is a single round trip against the backend; errors propagate
/// immediately without retries at this layer. Implemented by
/// [`S3StorageClient`] in production and by an in-memory mock in tests.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Writes one object under the given key
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the backend write fails
    async fn put_object(&self, params: PutObjectParams) -> StorageResult<()>;

    /// Fetches the full object body into memory
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key is absent
    /// Returns `StorageError::ReadFailed` for any other backend failure
    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Checks whether an object exists under the given key
    ///
    /// # Errors
    ///
    /// Returns `StorageError::UpstreamError` for 5xx responses
    /// Returns `StorageError::S3Error` for other backend failures
    async fn object_exists(&self, key: &str) -> StorageResult<bool>;

    /// Generates a presigned GET URL valid for `expires_in`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConfigError` if the presigning config is invalid
    /// Returns `StorageError::S3Error` if URL generation fails
    async fn presign_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Enumerates all objects in the bucket in backend-determined order
    ///
    /// # Errors
    ///
    /// Returns `StorageError::S3Error` if the listing call fails
    async fn list_objects(&self) -> StorageResult<Vec<ObjectEntry>>;

    /// Deletes the object under the given key; deleting an absent key succeeds
    ///
    /// # Errors
    ///
    /// Returns `StorageError::S3Error` if the delete call fails
    async fn delete_object(&self, key: &str) -> StorageResult<()>;
}

/// S3-backed storage client
pub struct S3StorageClient {
    client: S3Client,
    bucket_name: String,
}

impl S3StorageClient {
    /// Creates a new S3 storage client for the given bucket
    #[must_use]
    pub const fn new(client: S3Client, bucket_name: String) -> Self {
        Self {
            client,
            bucket_name,
        }
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn put_object(&self, params: PutObjectParams) -> StorageResult<()> {
        debug!(
            "Writing {} bytes to bucket {} under key {}",
            params.body.len(),
            self.bucket_name,
            params.key
        );

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&params.key)
            .content_type(&params.content_type)
            .body(ByteStream::from(params.body))
            .send()
            .await?;

        Ok(())
    }

    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        debug!("Reading object {} from bucket {}", key, self.bucket_name);

        let result = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), GetObjectError::NoSuchKey(_)) =>
            {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::ReadFailed(format!("failed to read object body: {e}")))?;

        Ok(bytes.into_bytes().to_vec())
    }

    async fn object_exists(&self, key: &str) -> StorageResult<bool> {
        let result = self
            .client
            .head_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                Ok(false)
            }
            Err(SdkError::ServiceError(service_err))
                if service_err.raw().status().as_u16() >= 500 =>
            {
                Err(StorageError::UpstreamError(format!("{service_err:?}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn presign_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StorageError::ConfigError(format!("failed to create presigning config: {e}"))
        })?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| StorageError::S3Error(format!("failed to generate presigned URL: {e}")))?;

        Ok(presigned.uri().to_string())
    }

    async fn list_objects(&self) -> StorageResult<Vec<ObjectEntry>> {
        debug!("Listing objects in bucket {}", self.bucket_name);

        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket_name)
            .send()
            .await?;

        let entries = response
            .contents()
            .iter()
            .map(|object| ObjectEntry {
                key: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or_default(),
                last_modified: object
                    .last_modified()
                    .and_then(|ts| DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())),
            })
            .collect();

        Ok(entries)
    }

    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        debug!("Deleting object {} from bucket {}", key, self.bucket_name);

        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await?;

        Ok(())
    }
}
