//! In-memory stand-in for the vector database backend.
//!
//! Backs both the `StorageLayer` facade (`store_embeddings`/`search_similar`)
//! and the [`VectorStore`] trait consumed by the semantic cache.

use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

/// A single vector record and its metadata.
#[derive(Debug, Clone)]
pub struct VectorData {
    pub id: String,
    pub vector: Vec<f32>,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A scored match returned from a similarity search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub id: String,
    pub score: f32,
    pub metadata: HashMap<String, serde_json::Value>,
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Trait implemented by anything the semantic cache can search for
/// near-duplicate prompts. The in-memory [`VectorStoreBackend`] is one
/// implementation; tests supply their own fakes.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<SearchResult>>;
    async fn insert(&self, vectors: Vec<VectorData>) -> Result<()>;
    async fn delete(&self, ids: Vec<String>) -> Result<()>;
}

/// In-memory, brute-force cosine-similarity vector store.
#[derive(Default)]
pub struct VectorStoreBackend {
    records: RwLock<HashMap<String, VectorData>>,
}

impl std::fmt::Debug for VectorStoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStoreBackend").finish_non_exhaustive()
    }
}

impl VectorStoreBackend {
    pub fn new() -> Self {
        info!("Using in-memory vector store backend");
        Self::default()
    }

    pub async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        Ok(())
    }

    pub async fn store(
        &self,
        id: &str,
        embeddings: &[f32],
        metadata: Option<serde_json::Value>,
    ) -> Result<()> {
        let metadata = match metadata {
            Some(serde_json::Value::Object(map)) => map.into_iter().collect(),
            Some(other) => HashMap::from([("value".to_string(), other)]),
            None => HashMap::new(),
        };
        self.records.write().await.insert(
            id.to_string(),
            VectorData {
                id: id.to_string(),
                vector: embeddings.to_vec(),
                metadata,
            },
        );
        Ok(())
    }

    pub async fn search(
        &self,
        query_vector: &[f32],
        limit: usize,
        threshold: Option<f32>,
    ) -> Result<Vec<SearchResult>> {
        let records = self.records.read().await;
        let mut scored: Vec<SearchResult> = records
            .values()
            .map(|record| SearchResult {
                id: record.id.clone(),
                score: cosine_similarity(query_vector, &record.vector),
                metadata: record.metadata.clone(),
            })
            .filter(|result| threshold.map(|t| result.score >= t).unwrap_or(true))
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }
}

#[async_trait]
impl VectorStore for VectorStoreBackend {
    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<SearchResult>> {
        VectorStoreBackend::search(self, &vector, limit, None).await
    }

    async fn insert(&self, vectors: Vec<VectorData>) -> Result<()> {
        let mut records = self.records.write().await;
        for record in vectors {
            records.insert(record.id.clone(), record);
        }
        Ok(())
    }

    async fn delete(&self, ids: Vec<String>) -> Result<()> {
        let mut records = self.records.write().await;
        for id in ids {
            records.remove(&id);
        }
        Ok(())
    }
}
