//! Alert dispatch.
//!
//! Spec non-goals exclude email alerting (alert *emission* is external); the
//! health monitor only computes the alertable condition. This manager just
//! fans a computed [`Alert`] out to whatever sinks are configured — today
//! that's a log line, matching the teacher's other "not yet wired up"
//! subsystems.

use super::types::Alert;
use crate::utils::error::Result;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Dispatches alerts raised by the monitoring system.
pub struct AlertManager {
    history: RwLock<Vec<Alert>>,
}

impl AlertManager {
    pub fn new() -> Self {
        Self {
            history: RwLock::new(Vec::new()),
        }
    }

    pub async fn start(&self) -> Result<()> {
        info!("Alert manager started");
        Ok(())
    }

    pub async fn stop(&self) -> Result<()> {
        info!("Alert manager stopped");
        Ok(())
    }

    pub async fn send_alert(&self, alert: Alert) -> Result<()> {
        warn!(severity = %alert.severity, title = %alert.title, "alert raised");
        self.history.write().await.push(alert);
        Ok(())
    }

    pub async fn recent(&self, limit: usize) -> Vec<Alert> {
        let history = self.history.read().await;
        history.iter().rev().take(limit).cloned().collect()
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new()
    }
}
