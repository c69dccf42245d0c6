//! Application state management

use std::sync::Arc;

use crate::file_storage::FileStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage gateway for file operations
    pub file_storage: Arc<FileStorage>,
}
