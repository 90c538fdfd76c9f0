//! Model pricing lookup.
//!
//! Feeds `price_input`/`price_output` on the Model Router's `ModelCandidate`
//! (spec §4.5) and the cost calculator (`utils/business/cost.rs`). Prices
//! are loaded once from a JSON file shaped like
//! `{"<model_id>": {"input_cost_per_token": f64, "output_cost_per_token": f64}}`
//! and refreshed on an interval so a redeployed price sheet doesn't require
//! a restart.

use crate::core::models::metrics::CostRates;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Loads and serves per-model cost rates.
pub struct PricingService {
    path: Option<String>,
    rates: Arc<RwLock<HashMap<String, CostRates>>>,
}

impl PricingService {
    pub fn new(path: Option<String>) -> Self {
        Self {
            path,
            rates: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load the price sheet from disk, if configured. Missing or malformed
    /// files are logged and otherwise ignored — the gateway runs with an
    /// empty price table rather than fail to start.
    pub async fn initialize(&self) -> Result<()> {
        self.reload().await
    }

    async fn reload(&self) -> Result<()> {
        let Some(path) = &self.path else {
            debug!("No pricing file configured, pricing service starting empty");
            return Ok(());
        };

        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read pricing file {path}: {e}");
                return Ok(());
            }
        };

        let raw: HashMap<String, CostRates> = match serde_json::from_str(&contents) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to parse pricing file {path}: {e}");
                return Ok(());
            }
        };

        info!("Loaded pricing for {} models from {path}", raw.len());
        *self.rates.write().await = raw;
        Ok(())
    }

    /// Look up the cost rates for a model id.
    pub async fn rates_for(&self, model_id: &str) -> Option<CostRates> {
        self.rates.read().await.get(model_id).cloned()
    }

    /// Spawn a background task that reloads the price sheet periodically.
    pub fn start_auto_refresh_task(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let service = self;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(3600));
            loop {
                interval.tick().await;
                if let Err(e) = service.reload().await {
                    warn!("Pricing refresh failed: {e}");
                }
            }
        })
    }
}
