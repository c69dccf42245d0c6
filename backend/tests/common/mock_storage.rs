use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use backend::file_storage::{
    ObjectEntry, PutObjectParams, StorageClient, StorageError, StorageResult,
};
use chrono::Utc;

/// In-memory storage client standing in for S3
///
/// Records enough call details for tests to assert on what the gateway
/// actually sent to the backend.
#[derive(Default)]
pub struct MockStorageClient {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    put_calls: Mutex<usize>,
    last_presign_expiry: Mutex<Option<Duration>>,
}

impl MockStorageClient {
    /// Number of objects currently stored
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Number of put calls observed so far
    pub fn put_call_count(&self) -> usize {
        *self.put_calls.lock().unwrap()
    }

    /// Expiry passed to the most recent presign call, if any
    pub fn last_presign_expiry(&self) -> Option<Duration> {
        *self.last_presign_expiry.lock().unwrap()
    }
}

#[async_trait]
impl StorageClient for MockStorageClient {
    async fn put_object(&self, params: PutObjectParams) -> StorageResult<()> {
        *self.put_calls.lock().unwrap() += 1;
        self.objects.lock().unwrap().insert(params.key, params.body);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn object_exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn presign_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        *self.last_presign_expiry.lock().unwrap() = Some(expires_in);
        Ok(format!(
            "http://localhost:4566/file-storage-dev/{key}?X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }

    async fn list_objects(&self) -> StorageResult<Vec<ObjectEntry>> {
        let objects = self.objects.lock().unwrap();
        Ok(objects
            .iter()
            .map(|(key, body)| ObjectEntry {
                key: key.clone(),
                size: body.len() as i64,
                last_modified: Some(Utc::now()),
            })
            .collect())
    }

    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}
