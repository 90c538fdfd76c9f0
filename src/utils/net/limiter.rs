//! Per-provider outbound concurrency bounding.
//!
//! Vendor HTTP client pools are per-provider with a configurable max
//! connection count; this caps in-flight requests to a provider so a burst
//! can't exhaust the process's file descriptors, queueing excess callers
//! instead of failing them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tokio::sync::{Semaphore, SemaphorePermit};

/// Bounds concurrent outbound requests to a single provider.
#[derive(Clone)]
pub struct ConnectionLimiter {
    semaphore: Arc<Semaphore>,
}

impl ConnectionLimiter {
    pub fn new(max_connections: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_connections.max(1))),
        }
    }

    /// Acquire a permit, waiting if the provider is already at its
    /// connection cap.
    pub async fn acquire(&self) -> SemaphorePermit<'_> {
        self.semaphore
            .acquire()
            .await
            .expect("ConnectionLimiter semaphore is never closed")
    }
}

static PROVIDER_LIMITERS: OnceLock<Mutex<HashMap<String, ConnectionLimiter>>> = OnceLock::new();

/// Get (creating on first use) the connection limiter for `provider`.
pub fn limiter_for_provider(provider: &str, max_connections: usize) -> ConnectionLimiter {
    let limiters = PROVIDER_LIMITERS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut limiters = limiters.lock().expect("provider limiter map poisoned");

    limiters
        .entry(provider.to_string())
        .or_insert_with(|| ConnectionLimiter::new(max_connections))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounds_concurrent_permits() {
        let limiter = ConnectionLimiter::new(1);
        let _first = limiter.acquire().await;
        assert_eq!(limiter.semaphore.available_permits(), 0);
    }

    #[test]
    fn reuses_limiter_per_provider() {
        let a = limiter_for_provider("openai", 5);
        let b = limiter_for_provider("openai", 5);
        assert_eq!(
            Arc::as_ptr(&a.semaphore) as usize,
            Arc::as_ptr(&b.semaphore) as usize
        );
    }
}
