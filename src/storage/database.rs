//! In-memory stand-in for the database backend.
//!
//! Spec scopes out the storage engine itself; this keeps `StorageLayer`'s
//! facade and call sites intact while persisting nothing to disk.

use crate::config::DatabaseConfig;
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Minimal in-memory key-value store standing in for a real database pool.
#[derive(Debug, Default)]
pub struct Database {
    rows: RwLock<std::collections::HashMap<String, String>>,
    query_count: AtomicU64,
}

impl Database {
    pub async fn new(_config: &DatabaseConfig) -> Result<Self> {
        info!("Using in-memory database backend");
        Ok(Self {
            rows: RwLock::new(std::collections::HashMap::new()),
            query_count: AtomicU64::new(0),
        })
    }

    pub async fn migrate(&self) -> Result<()> {
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            size: 1,
            idle: 1,
            query_count: self.query_count.load(Ordering::Relaxed),
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        self.query_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.rows.read().await.get(key).cloned())
    }

    pub async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.query_count.fetch_add(1, Ordering::Relaxed);
        self.rows
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Snapshot of database counters, surfaced by the health checker.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct DatabaseStats {
    pub size: u32,
    pub idle: u32,
    pub query_count: u64,
}

pub type DatabaseHandle = Arc<Database>;
