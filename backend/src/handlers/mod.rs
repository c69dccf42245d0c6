use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

mod files;
mod health;

/// Maximum accepted upload body size in bytes; uploads buffer fully in memory
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Creates the router with all handler routes
pub fn routes() -> Router<AppState> {
    let files = Router::new()
        .route("/upload", post(files::upload_file))
        .route("/download/{key}", get(files::download_file))
        .route("/presigned-url/{key}", get(files::presigned_url))
        .route("/list", get(files::list_files))
        .route("/delete/{key}", delete(files::delete_file));

    Router::new()
        .route("/health", get(health::handler))
        .nest("/api/v1/files", files)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
