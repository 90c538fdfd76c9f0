//! Response Cache (spec component C9)
//!
//! Fingerprint-keyed cache for unary completion responses
//! (`hash(providerName, modelId, normalized(messages), temperature, topP,
//! maxTokens, tools)`, spec §4.1 step 2). Only `temperature == 0` requests are
//! cacheable; everyone else bypasses the cache entirely. At most one
//! concurrent vendor call proceeds per fingerprint — late arrivals for the
//! same key await the in-flight result instead of duplicating the call
//! (spec §4.9's single-flight requirement).

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use tokio::sync::Notify;

use crate::core::completion::{CompletionOptions, CompletionResponse, Message};
use crate::utils::error::Result;

/// TTL for entries built from a `temperature == 0` request (spec §4.9: "long,
/// >= 1h").
const CACHEABLE_TTL: Duration = Duration::from_secs(3600);

/// How long a follower waits on a leader's in-flight build before giving up
/// and racing to become the leader itself. Guards against the (rare) case
/// where the leader finishes and calls `notify_waiters()` in the narrow
/// window between a follower cloning the `Notify` and awaiting it.
const FOLLOWER_WAIT: Duration = Duration::from_secs(35);

/// Compute the cache fingerprint for a request.
pub fn fingerprint(provider: &str, model: &str, messages: &[Message], options: &CompletionOptions) -> u64 {
    let mut hasher = DefaultHasher::new();
    provider.hash(&mut hasher);
    model.hash(&mut hasher);
    for message in messages {
        message.role.hash(&mut hasher);
        message.content.trim().hash(&mut hasher);
    }
    options.temperature.map(f32::to_bits).hash(&mut hasher);
    options.top_p.map(f32::to_bits).hash(&mut hasher);
    options.max_tokens.hash(&mut hasher);
    if let Some(tools) = &options.tools {
        serde_json::to_string(tools).unwrap_or_default().hash(&mut hasher);
    }
    hasher.finish()
}

/// Whether a request is eligible for the cache at all (spec §4.1 step 2:
/// `temperature == 0`; streaming responses are never cached, spec §4.9).
pub fn is_cacheable(options: &CompletionOptions) -> bool {
    !options.stream && options.temperature == Some(0.0)
}

struct Entry {
    response: CompletionResponse,
    expires_at: Instant,
}

enum Lease {
    Leader,
    Follower(Arc<Notify>),
}

/// Fingerprint-keyed response cache with a single-flight guard per key.
pub struct ResponseCache {
    entries: RwLock<HashMap<u64, Entry>>,
    inflight: Mutex<HashMap<u64, Arc<Notify>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: u64) -> Option<CompletionResponse> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.response.clone())
    }

    fn put(&self, key: u64, response: CompletionResponse) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            Entry {
                response,
                expires_at: Instant::now() + CACHEABLE_TTL,
            },
        );
    }

    fn acquire_lease(&self, key: u64) -> Lease {
        let mut inflight = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        match inflight.get(&key) {
            Some(notify) => Lease::Follower(notify.clone()),
            None => {
                inflight.insert(key, Arc::new(Notify::new()));
                Lease::Leader
            }
        }
    }

    fn release_lease(&self, key: u64) {
        let notify = {
            let mut inflight = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
            inflight.remove(&key)
        };
        if let Some(notify) = notify {
            notify.notify_waiters();
        }
    }

    /// Resolve a response for `key`, invoking `build` at most once for the
    /// leader of this fingerprint. `cacheable` gates both the lookup and the
    /// eventual store; ineligible requests bypass the cache and the
    /// single-flight guard entirely. A follower that times out or wakes to
    /// find the leader's build failed falls through to building directly
    /// itself, rather than re-entering the lease machinery.
    pub async fn get_or_build<F, Fut>(&self, key: u64, cacheable: bool, build: F) -> Result<CompletionResponse>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CompletionResponse>>,
    {
        if !cacheable {
            return build().await;
        }

        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }

        match self.acquire_lease(key) {
            Lease::Leader => {
                let result = build().await;
                if let Ok(response) = &result {
                    self.put(key, response.clone());
                }
                self.release_lease(key);
                result
            }
            Lease::Follower(notify) => {
                let _ = tokio::time::timeout(FOLLOWER_WAIT, notify.notified()).await;
                match self.get(key) {
                    Some(hit) => Ok(hit),
                    None => build().await,
                }
            }
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::completion::helpers::user_message;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn response(id: &str) -> CompletionResponse {
        CompletionResponse {
            id: id.to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: "gpt-4".to_string(),
            choices: Vec::new(),
            usage: None,
        }
    }

    #[test]
    fn fingerprint_is_stable_for_identical_inputs() {
        let messages = vec![user_message("hi")];
        let options = CompletionOptions {
            temperature: Some(0.0),
            ..Default::default()
        };
        let a = fingerprint("openai", "gpt-4", &messages, &options);
        let b = fingerprint("openai", "gpt-4", &messages, &options);
        assert_eq!(a, b);
    }

    #[test]
    fn only_zero_temperature_unary_requests_are_cacheable() {
        assert!(is_cacheable(&CompletionOptions {
            temperature: Some(0.0),
            ..Default::default()
        }));
        assert!(!is_cacheable(&CompletionOptions {
            temperature: Some(0.2),
            ..Default::default()
        }));
        assert!(!is_cacheable(&CompletionOptions {
            temperature: Some(0.0),
            stream: true,
            ..Default::default()
        }));
    }

    #[tokio::test]
    async fn ineligible_requests_bypass_the_cache() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);
        for _ in 0..3 {
            cache
                .get_or_build(1, false, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(response("a"))
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn second_cacheable_lookup_hits_without_rebuilding() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);
        let build = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(response("a"))
        };

        let first = cache.get_or_build(42, true, build).await.unwrap();
        let second = cache.get_or_build(42, true, build).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_build() {
        let cache = Arc::new(ResponseCache::new());
        let calls = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_build(7, true, || {
                        let calls = calls.clone();
                        async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok(response("shared"))
                        }
                    })
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().id, "shared");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
