use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use backend::file_storage::{FileStorage, S3StorageClient};
use backend::server;
use backend::types::Environment;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.tracing_level().to_string()));
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    let s3_client = S3Client::from_conf(environment.s3_client_config().await);
    let storage_client = Arc::new(S3StorageClient::new(s3_client, environment.s3_bucket()));
    let file_storage = Arc::new(FileStorage::new(
        storage_client,
        environment.presigned_url_expiry_secs(),
    ));

    server::start(environment, file_storage).await
}
