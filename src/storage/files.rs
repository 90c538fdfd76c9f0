//! In-memory stand-in for the file storage backend.

use crate::config::models::file_storage::FileStorageConfig;
use crate::utils::error::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// In-memory replacement for a local/S3 file store.
#[derive(Default)]
pub struct FileStorage {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage").finish_non_exhaustive()
    }
}

impl FileStorage {
    pub async fn new(_config: &FileStorageConfig) -> Result<Self> {
        info!("Using in-memory file storage backend");
        Ok(Self::default())
    }

    pub async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        Ok(())
    }

    pub async fn store(&self, _filename: &str, content: &[u8]) -> Result<String> {
        let file_id = Uuid::new_v4().to_string();
        self.files
            .write()
            .await
            .insert(file_id.clone(), content.to_vec());
        Ok(file_id)
    }

    pub async fn get(&self, file_id: &str) -> Result<Vec<u8>> {
        self.files
            .read()
            .await
            .get(file_id)
            .cloned()
            .ok_or_else(|| {
                crate::utils::error::GatewayError::NotFound(format!("file {file_id} not found"))
            })
    }

    pub async fn delete(&self, file_id: &str) -> Result<()> {
        self.files.write().await.remove(file_id);
        Ok(())
    }
}
