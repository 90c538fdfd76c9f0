//! In-memory stand-in for the Redis cache/pub-sub backend.
//!
//! Mirrors the shape of a real connection pool so `StorageLayer`'s facade
//! methods keep working without an external Redis deployment.

use crate::config::RedisConfig;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::info;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

/// In-memory replacement for a Redis connection pool.
#[derive(Default)]
pub struct RedisPool {
    strings: RwLock<HashMap<String, Entry>>,
    lists: RwLock<HashMap<String, Vec<String>>>,
    sets: RwLock<HashMap<String, std::collections::HashSet<String>>>,
    hashes: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool").finish_non_exhaustive()
    }
}

impl RedisPool {
    pub async fn new(_config: &RedisConfig) -> Result<Self> {
        info!("Using in-memory Redis backend");
        Ok(Self::default())
    }

    pub async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        Ok(())
    }

    pub async fn get_connection(&self) -> Result<RedisConnection> {
        Ok(RedisConnection)
    }

    fn is_live(entry: &Entry) -> bool {
        entry.expires_at.map(|exp| exp > Instant::now()).unwrap_or(true)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut guard = self.strings.write().await;
        if let Some(entry) = guard.get(key) {
            if Self::is_live(entry) {
                return Ok(Some(entry.value.clone()));
            }
            guard.remove(key);
        }
        Ok(None)
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()> {
        let expires_at = ttl.map(|secs| Instant::now() + Duration::from_secs(secs));
        self.strings.write().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.strings.write().await.remove(key);
        Ok(())
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    pub async fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            out.push(self.get(key).await?);
        }
        Ok(out)
    }

    pub async fn mset(&self, pairs: &[(String, String)], ttl: Option<u64>) -> Result<()> {
        for (key, value) in pairs {
            self.set(key, value, ttl).await?;
        }
        Ok(())
    }

    pub async fn list_push(&self, key: &str, value: &str) -> Result<()> {
        self.lists
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        Ok(())
    }

    pub async fn list_pop(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lists.write().await.get_mut(key).and_then(Vec::pop))
    }

    pub async fn list_length(&self, key: &str) -> Result<usize> {
        Ok(self
            .lists
            .read()
            .await
            .get(key)
            .map(Vec::len)
            .unwrap_or(0))
    }

    pub async fn set_add(&self, key: &str, member: &str) -> Result<()> {
        self.sets
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    pub async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
        if let Some(set) = self.sets.write().await.get_mut(key) {
            set.remove(member);
        }
        Ok(())
    }

    pub async fn set_members(&self, key: &str) -> Result<Vec<String>> {
        Ok(self
            .sets
            .read()
            .await
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    pub async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<()> {
        self.hashes
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    pub async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>> {
        Ok(self
            .hashes
            .read()
            .await
            .get(key)
            .and_then(|map| map.get(field).cloned()))
    }

    pub async fn hash_delete(&self, key: &str, field: &str) -> Result<()> {
        if let Some(map) = self.hashes.write().await.get_mut(key) {
            map.remove(field);
        }
        Ok(())
    }

    pub async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        Ok(self
            .hashes
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    pub async fn publish(&self, _channel: &str, _message: &str) -> Result<()> {
        Ok(())
    }

    pub async fn subscribe(&self, _channels: &[String]) -> Result<Subscription> {
        Ok(Subscription)
    }
}

/// Placeholder connection handle; the in-memory backend needs no pooling.
#[derive(Debug)]
pub struct RedisConnection;

/// Placeholder subscription handle for pub/sub.
#[derive(Debug)]
pub struct Subscription;
