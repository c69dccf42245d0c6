//! Object storage gateway: uploads, downloads, presigned links, listings

mod client;
mod error;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

pub use client::{ObjectEntry, PutObjectParams, S3StorageClient, StorageClient};
pub use error::{StorageError, StorageResult};

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for GET operations
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Metadata for one stored object, as reported by the bucket listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Object key
    pub key: String,
    /// Size in bytes
    pub size: i64,
    /// Content type; bucket listings carry none, so this is the octet-stream default
    pub content_type: String,
    /// Last modification time, null when the backend reports none
    pub last_modified: Option<DateTime<Utc>>,
}

/// Storage gateway for file operations
///
/// Every operation maps to exactly one backend call (uploads and presigns
/// additionally probe for existence). The backend is authoritative for all
/// data and metadata; nothing is cached or persisted locally.
pub struct FileStorage {
    client: Arc<dyn StorageClient>,
    presigned_url_expiry_secs: u64,
}

impl FileStorage {
    /// Creates a new file storage gateway
    #[must_use]
    pub fn new(client: Arc<dyn StorageClient>, presigned_url_expiry_secs: u64) -> Self {
        Self {
            client,
            presigned_url_expiry_secs,
        }
    }

    /// Uploads a file and returns the generated object key
    ///
    /// The key is `<uuid-v4>-<original filename>`, so repeated uploads of the
    /// same filename never collide.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidInput` if the body is empty or the
    /// filename is missing, before any backend call is made
    /// Returns `StorageError::WriteFailed` if the backend write fails
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        original_filename: &str,
        declared_content_type: Option<&str>,
    ) -> StorageResult<String> {
        if bytes.is_empty() {
            return Err(StorageError::InvalidInput("file body is empty".to_string()));
        }
        if original_filename.is_empty() {
            return Err(StorageError::InvalidInput(
                "file name is missing".to_string(),
            ));
        }

        let key = generate_object_key(original_filename);
        let content_type = declared_content_type
            .unwrap_or(mime::APPLICATION_OCTET_STREAM.as_ref())
            .to_string();

        self.client
            .put_object(PutObjectParams {
                key: key.clone(),
                content_type,
                body: bytes,
            })
            .await?;

        info!("File uploaded under key: {key}");
        Ok(key)
    }

    /// Fetches the full object body into memory
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key is absent
    /// Returns `StorageError::ReadFailed` for any other backend failure
    pub async fn download_file(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.client.get_object(key).await
    }

    /// Generates a fresh presigned download URL for an existing object
    ///
    /// The URL is valid for the configured expiry (one hour by default).
    /// Issued URLs are not cached; every call produces a new one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key is absent
    /// Returns `StorageError::S3Error` if URL generation fails
    pub async fn presigned_download_url(&self, key: &str) -> StorageResult<PresignedUrl> {
        // Presigning is local computation and never touches the bucket, so an
        // existence probe is required to surface missing keys.
        if !self.client.object_exists(key).await? {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let expires_in = Duration::from_secs(self.presigned_url_expiry_secs);
        let url = self.client.presign_get_url(key, expires_in).await?;
        let expires_at = Utc::now() + expires_in;

        Ok(PresignedUrl { url, expires_at })
    }

    /// Enumerates all stored objects in backend-determined order
    ///
    /// # Errors
    ///
    /// Returns `StorageError::S3Error` if the listing call fails
    pub async fn list_files(&self) -> StorageResult<Vec<FileMetadata>> {
        let entries = self.client.list_objects().await?;

        Ok(entries
            .into_iter()
            .map(|entry| FileMetadata {
                key: entry.key,
                size: entry.size,
                content_type: mime::APPLICATION_OCTET_STREAM.as_ref().to_string(),
                last_modified: entry.last_modified,
            })
            .collect())
    }

    /// Deletes the object under the given key
    ///
    /// Idempotent: deleting a key that was never uploaded succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::S3Error` if the delete call fails
    pub async fn delete_file(&self, key: &str) -> StorageResult<()> {
        self.client.delete_object(key).await?;
        info!("File deleted under key: {key}");
        Ok(())
    }
}

/// Builds an object key as `<uuid-v4>-<original filename>`
fn generate_object_key(original_filename: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), original_filename)
}
