//! Usage & Metrics Sink (spec component C3)
//!
//! Append-only Token Usage accounting plus a rolling per-model metrics table
//! (`ModelMetrics`) that the Model Router (C5) reads back through
//! [`crate::core::router::MetricsSource`]. Writes are best-effort: a failure
//! here never fails the request it's accounting for, it only logs.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::core::router::MetricsSource;

/// What kind of call a [`TokenUsageRecord`] accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Completion,
    StreamingCompletion,
    Embedding,
}

impl RequestType {
    fn as_str(&self) -> &'static str {
        match self {
            RequestType::Completion => "completion",
            RequestType::StreamingCompletion => "streaming_completion",
            RequestType::Embedding => "embedding",
        }
    }
}

/// A single accounted call, successful or not.
#[derive(Debug, Clone)]
pub struct TokenUsageRecord {
    pub timestamp: DateTime<Utc>,
    pub model_id: String,
    pub provider: String,
    pub request_type: RequestType,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub cost: f64,
    pub success: bool,
}

/// Rolling metrics for one model, updated on every call.
#[derive(Debug, Default)]
struct ModelMetrics {
    success_count: u64,
    error_count: u64,
    avg_latency_ms: Option<f64>,
    avg_cost_per_request: f64,
    recent_calls: VecDeque<Instant>,
}

impl ModelMetrics {
    /// Drop timestamps older than 60s and report how many remain.
    fn prune_and_count(&mut self) -> u64 {
        let cutoff = Instant::now().checked_sub(Duration::from_secs(60));
        if let Some(cutoff) = cutoff {
            while matches!(self.recent_calls.front(), Some(t) if *t < cutoff) {
                self.recent_calls.pop_front();
            }
        }
        self.recent_calls.len() as u64
    }
}

/// The Usage & Metrics Sink. Per-model updates are serialized through a
/// single `RwLock`'s write half — stronger than strictly required, but
/// matches the health monitor's `Arc<RwLock<HashMap<_>>>` convention
/// (`core::health::monitor::HealthMonitor`) rather than introducing a new
/// locking primitive for one module.
pub struct UsageMetricsSink {
    records: RwLock<Vec<TokenUsageRecord>>,
    models: RwLock<HashMap<String, ModelMetrics>>,
    retention: Duration,
}

impl UsageMetricsSink {
    /// `retention` bounds how long Token Usage records are kept before
    /// [`Self::sweep_retention`] drops them (`DataRetentionPeriod`, default 90d).
    pub fn new(retention: Duration) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            models: RwLock::new(HashMap::new()),
            retention,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn record_success(
        &self,
        model_id: &str,
        provider: &str,
        request_type: RequestType,
        prompt_tokens: u32,
        completion_tokens: u32,
        cost: f64,
        latency_ms: f64,
    ) {
        self.push_record(TokenUsageRecord {
            timestamp: Utc::now(),
            model_id: model_id.to_string(),
            provider: provider.to_string(),
            request_type,
            prompt_tokens,
            completion_tokens,
            cost,
            success: true,
        });

        let Ok(mut models) = self.models.write() else {
            warn!(model_id, "usage metrics map poisoned, dropping update");
            return;
        };
        let entry = models.entry(model_id.to_string()).or_default();
        entry.success_count += 1;
        entry.avg_latency_ms = Some(match entry.avg_latency_ms {
            Some(old) => 0.7 * old + 0.3 * latency_ms,
            None => latency_ms,
        });
        let n = (entry.success_count + entry.error_count) as f64;
        entry.avg_cost_per_request += (cost - entry.avg_cost_per_request) / n;
        entry.recent_calls.push_back(Instant::now());
        entry.prune_and_count();
    }

    pub fn record_failure(
        &self,
        model_id: &str,
        provider: &str,
        request_type: RequestType,
        prompt_tokens: u32,
        completion_tokens: u32,
    ) {
        self.push_record(TokenUsageRecord {
            timestamp: Utc::now(),
            model_id: model_id.to_string(),
            provider: provider.to_string(),
            request_type,
            prompt_tokens,
            completion_tokens,
            cost: 0.0,
            success: false,
        });

        let Ok(mut models) = self.models.write() else {
            warn!(model_id, "usage metrics map poisoned, dropping update");
            return;
        };
        let entry = models.entry(model_id.to_string()).or_default();
        entry.error_count += 1;
        entry.recent_calls.push_back(Instant::now());
        entry.prune_and_count();
    }

    fn push_record(&self, record: TokenUsageRecord) {
        match self.records.write() {
            Ok(mut records) => records.push(record),
            Err(_) => warn!(
                model_id = %record.model_id,
                "token usage log poisoned, dropping record"
            ),
        }
    }

    /// Drop Token Usage records older than `retention`. Intended to run
    /// periodically from a background task, same shape as
    /// `services::pricing`'s refresh loop.
    pub fn sweep_retention(&self) {
        let Ok(mut records) = self.records.write() else {
            warn!("token usage log poisoned, skipping retention sweep");
            return;
        };
        let Some(cutoff) = chrono::Duration::from_std(self.retention).ok() else {
            return;
        };
        let cutoff = Utc::now() - cutoff;
        records.retain(|r| r.timestamp >= cutoff);
    }

    /// Number of Token Usage records currently retained (for tests/diagnostics).
    pub fn record_count(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }
}

impl MetricsSource for UsageMetricsSink {
    fn avg_latency_ms(&self, model_id: &str) -> Option<f64> {
        self.models.read().ok()?.get(model_id)?.avg_latency_ms
    }

    fn throughput_per_minute(&self, model_id: &str) -> u64 {
        let Ok(mut models) = self.models.write() else {
            return 0;
        };
        models
            .get_mut(model_id)
            .map(|m| m.prune_and_count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_updates_latency_and_cost() {
        let sink = UsageMetricsSink::new(Duration::from_secs(90 * 24 * 3600));
        sink.record_success("gpt-4", "openai", RequestType::Completion, 10, 20, 0.01, 100.0);
        sink.record_success("gpt-4", "openai", RequestType::Completion, 10, 20, 0.03, 200.0);

        let latency = sink.avg_latency_ms("gpt-4").unwrap();
        assert!((latency - 130.0).abs() < 1e-9);
        assert_eq!(sink.throughput_per_minute("gpt-4"), 2);
        assert_eq!(sink.record_count(), 2);
    }

    #[test]
    fn failure_increments_error_count_without_touching_cost() {
        let sink = UsageMetricsSink::new(Duration::from_secs(3600));
        sink.record_success("gpt-4", "openai", RequestType::Completion, 10, 20, 0.02, 100.0);
        sink.record_failure("gpt-4", "openai", RequestType::Completion, 10, 0);

        assert_eq!(sink.throughput_per_minute("gpt-4"), 2);
        assert_eq!(sink.record_count(), 2);
    }

    #[test]
    fn unknown_model_has_no_latency_sample() {
        let sink = UsageMetricsSink::new(Duration::from_secs(3600));
        assert_eq!(sink.avg_latency_ms("nothing-yet"), None);
        assert_eq!(sink.throughput_per_minute("nothing-yet"), 0);
    }

    #[test]
    fn retention_sweep_drops_old_records() {
        let sink = UsageMetricsSink::new(Duration::from_secs(0));
        sink.record_success("gpt-4", "openai", RequestType::Completion, 10, 20, 0.01, 100.0);
        assert_eq!(sink.record_count(), 1);
        sink.sweep_retention();
        assert_eq!(sink.record_count(), 0);
    }
}
