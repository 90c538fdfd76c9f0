//! Lockout tracking for repeated authentication failures.
//!
//! Distinct from the general request-rate limiter (`core::rate_limiter`):
//! this one only counts failed credential checks per client, and escalates
//! the lockout window exponentially rather than smoothing over a fixed
//! window.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct ClientState {
    failures: u32,
    locked_until: Option<Instant>,
}

/// Tracks auth failures per client id and locks out repeat offenders.
pub struct AuthRateLimiter {
    max_attempts: u32,
    window: Duration,
    base_lockout: Duration,
    clients: Mutex<HashMap<String, ClientState>>,
    blocked_attempts: AtomicU64,
}

impl AuthRateLimiter {
    pub fn new(max_attempts: u32, window_secs: u64, base_lockout_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
            base_lockout: Duration::from_secs(base_lockout_secs),
            clients: Mutex::new(HashMap::new()),
            blocked_attempts: AtomicU64::new(0),
        }
    }

    /// `Ok(())` if `client_id` may attempt authentication now, `Err(remaining_secs)`
    /// if it is currently locked out.
    pub fn check_allowed(&self, client_id: &str) -> Result<(), u64> {
        let clients = self.clients.lock().unwrap();
        if let Some(state) = clients.get(client_id) {
            if let Some(until) = state.locked_until {
                let now = Instant::now();
                if now < until {
                    self.blocked_attempts.fetch_add(1, Ordering::Relaxed);
                    return Err((until - now).as_secs());
                }
            }
        }
        Ok(())
    }

    /// Record a failed attempt. Returns the lockout duration in seconds if
    /// this failure tripped the limit, `None` otherwise.
    pub fn record_failure(&self, client_id: &str) -> Option<u64> {
        let mut clients = self.clients.lock().unwrap();
        let state = clients.entry(client_id.to_string()).or_insert(ClientState {
            failures: 0,
            locked_until: None,
        });

        state.failures += 1;
        if state.failures >= self.max_attempts {
            let exponent = state.failures - self.max_attempts;
            let multiplier = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
            let lockout = self.base_lockout * multiplier;
            state.locked_until = Some(Instant::now() + lockout);
            Some(lockout.as_secs())
        } else {
            None
        }
    }

    /// A successful attempt clears the failure history for `client_id`.
    pub fn record_success(&self, client_id: &str) {
        self.clients.lock().unwrap().remove(client_id);
    }

    /// Number of checks rejected due to an active lockout, since creation.
    pub fn blocked_attempts(&self) -> u64 {
        self.blocked_attempts.load(Ordering::Relaxed)
    }

    /// Unused window accessor, kept for parity with the failure-window design.
    pub fn window(&self) -> Duration {
        self.window
    }
}

static GLOBAL: OnceLock<Arc<AuthRateLimiter>> = OnceLock::new();

/// Shared limiter instance used by [`super::auth::AuthMiddleware`].
pub fn get_auth_rate_limiter() -> Arc<AuthRateLimiter> {
    GLOBAL
        .get_or_init(|| Arc::new(AuthRateLimiter::new(5, 300, 30)))
        .clone()
}
