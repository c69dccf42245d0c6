//! Error types for object storage operations

use aws_sdk_s3::{
    error::SdkError,
    operation::{
        delete_object::DeleteObjectError, get_object::GetObjectError,
        head_object::HeadObjectError, list_objects_v2::ListObjectsV2Error,
        put_object::PutObjectError,
    },
};
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Upload payload was empty or missing required fields
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Object does not exist in the bucket
    #[error("object not found: {0}")]
    NotFound(String),

    /// Write to the storage backend failed
    #[error("storage write failed: {0}")]
    WriteFailed(String),

    /// Read from the storage backend failed
    #[error("storage read failed: {0}")]
    ReadFailed(String),

    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Upstream service error (5xx from S3)
    #[error("upstream service error: {0}")]
    UpstreamError(String),
}

impl From<SdkError<PutObjectError>> for StorageError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::WriteFailed(error.to_string())
    }
}

impl From<SdkError<GetObjectError>> for StorageError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        // NoSuchKey is matched in the client before this conversion applies
        Self::ReadFailed(error.to_string())
    }
}

impl From<SdkError<HeadObjectError>> for StorageError {
    fn from(error: SdkError<HeadObjectError>) -> Self {
        Self::S3Error(error.to_string())
    }
}

impl From<SdkError<ListObjectsV2Error>> for StorageError {
    fn from(error: SdkError<ListObjectsV2Error>) -> Self {
        Self::S3Error(error.to_string())
    }
}

impl From<SdkError<DeleteObjectError>> for StorageError {
    fn from(error: SdkError<DeleteObjectError>) -> Self {
        Self::S3Error(error.to_string())
    }
}
