use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    file_storage::{FileMetadata, StorageError},
    state::AppState,
    types::ApiError,
};

/// Response body for a successful upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Generated object key
    pub key: String,
    /// Presigned download URL for the uploaded object
    pub url: String,
    /// Human-readable confirmation
    pub message: String,
}

/// One file part extracted from the multipart payload
struct FilePart {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_file_part(mut multipart: Multipart) -> Result<FilePart, ApiError> {
    let malformed = |err: axum::extract::multipart::MultipartError| {
        tracing::warn!("Malformed multipart payload: {err}");
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "invalid_multipart",
            "Malformed multipart payload",
            false,
        )
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field.bytes().await.map_err(malformed)?.to_vec();

        return Ok(FilePart {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(StorageError::InvalidInput("multipart field `file` is missing".to_string()).into())
}

#[instrument(skip(app_state, multipart))]
pub async fn upload_file(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let part = read_file_part(multipart).await?;
    info!(
        "Received upload request for file: {} ({} bytes)",
        part.file_name,
        part.bytes.len()
    );

    let key = app_state
        .file_storage
        .upload_file(part.bytes, &part.file_name, part.content_type.as_deref())
        .await?;

    let presigned = app_state.file_storage.presigned_download_url(&key).await?;

    Ok(Json(UploadResponse {
        key,
        url: presigned.url,
        message: "File uploaded successfully".to_string(),
    }))
}

#[instrument(skip(app_state))]
pub async fn download_file(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = app_state.file_storage.download_file(&key).await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            mime::APPLICATION_OCTET_STREAM.as_ref().to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{key}\""),
        ),
    ];

    Ok((headers, bytes).into_response())
}

#[instrument(skip(app_state))]
pub async fn presigned_url(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> Result<String, ApiError> {
    let presigned = app_state.file_storage.presigned_download_url(&key).await?;
    Ok(presigned.url)
}

#[instrument(skip(app_state))]
pub async fn list_files(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<FileMetadata>>, ApiError> {
    let files = app_state.file_storage.list_files().await?;
    Ok(Json(files))
}

#[instrument(skip(app_state))]
pub async fn delete_file(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> Result<String, ApiError> {
    app_state.file_storage.delete_file(&key).await?;
    Ok(format!("File deleted successfully: {key}"))
}
