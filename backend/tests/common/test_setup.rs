use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use backend::file_storage::FileStorage;
use backend::handlers;
use backend::state::AppState;
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::MockStorageClient;

/// Presign expiry used by test routers, matching the production default
pub const TEST_PRESIGN_EXPIRY_SECS: u64 = 3600;

/// Base test setup with a mock-backed router
pub struct TestContext {
    pub router: Router,
    pub storage_client: Arc<MockStorageClient>,
    pub file_storage: Arc<FileStorage>,
}

impl TestContext {
    pub fn new() -> Self {
        let storage_client = Arc::new(MockStorageClient::default());
        let file_storage = Arc::new(FileStorage::new(
            storage_client.clone(),
            TEST_PRESIGN_EXPIRY_SECS,
        ));

        let router = handlers::routes().with_state(AppState {
            file_storage: file_storage.clone(),
        });

        Self {
            router,
            storage_client,
            file_storage,
        }
    }

    /// Sends a multipart upload with a single part under `field_name`
    pub async fn send_multipart_upload(
        &self,
        field_name: &str,
        file_name: Option<&str>,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let boundary = "test-boundary";

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        let disposition = file_name.map_or_else(
            || format!("Content-Disposition: form-data; name=\"{field_name}\"\r\n"),
            |name| {
                format!(
                    "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{name}\"\r\n"
                )
            },
        );
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .uri("/api/v1/files/upload")
            .method("POST")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// Convenience wrapper for uploading under the expected `file` field
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_multipart_upload("file", Some(file_name), "application/octet-stream", bytes)
            .await
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_delete_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("DELETE")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

/// Collects a response body as raw bytes
pub async fn read_response_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes()
        .to_vec()
}

/// Parses a response body as JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = read_response_bytes(response).await;
    serde_json::from_slice(&body).expect("Response body is not valid JSON")
}

/// Reads a response body as UTF-8 text
pub async fn read_response_text(response: Response) -> String {
    let body = read_response_bytes(response).await;
    String::from_utf8(body).expect("Response body is not valid UTF-8")
}
