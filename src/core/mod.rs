//! Core functionality for the Gateway
//!
//! This module contains the core business logic and data structures.

#![allow(dead_code)]

pub mod cache_manager;
pub mod completion; // Core completion API
pub mod cost; // Unified cost calculation system
pub mod health; // Health monitoring system
pub mod models;
pub mod providers;
pub mod rate_limiter; // Rate limiting system
pub mod response_cache; // Response Cache (spec component C9)
pub mod router; // Model Router (spec component C5)
pub mod security;
pub mod semantic_cache;
pub mod streaming;
pub mod traits;
pub mod types;
pub mod usage_metrics; // Usage & Metrics Sink (spec component C3)

use crate::config::Config;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Single value that owns every long-lived subsystem (provider registry,
/// health monitor, model router, storage, auth, monitoring) so pipelines
/// can take it by reference instead of reaching into a service locator.
#[derive(Clone)]
pub struct Core {
    /// Gateway configuration
    config: Arc<Config>,
    /// Storage layer
    storage: Arc<crate::storage::StorageLayer>,
    /// Authentication system
    auth: Arc<crate::auth::AuthSystem>,
    /// Monitoring system
    monitoring: Arc<crate::monitoring::system::MonitoringSystem>,
    /// Provider registry
    providers: Arc<providers::ProviderRegistry>,
    /// Provider health monitor, backing the router's `HealthSource`
    health_monitor: Arc<health::monitor::HealthMonitor>,
    /// Model router
    router: Arc<router::ModelRouter>,
}

impl Core {
    /// Create a new Core instance, wiring every subsystem from config.
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing Core");

        let config = Arc::new(config);

        debug!("Initializing storage layer");
        let storage = Arc::new(crate::storage::StorageLayer::new(&config.gateway.storage).await?);

        debug!("Initializing authentication system");
        let auth =
            Arc::new(crate::auth::AuthSystem::new(&config.gateway.auth, storage.clone()).await?);

        debug!("Initializing monitoring system");
        let monitoring = Arc::new(
            crate::monitoring::system::MonitoringSystem::new(
                &config.gateway.monitoring,
                storage.clone(),
            )
            .await?,
        );

        debug!("Initializing provider registry");
        let providers = Arc::new(providers::ProviderRegistry::new());

        debug!("Initializing health monitor");
        let health_monitor = Arc::new(health::monitor::HealthMonitor::new(
            health::monitor::HealthMonitorConfig::default(),
        ));

        debug!("Initializing model router");
        let router = Arc::new(router::ModelRouter::new(
            router::RoutingPolicy::default(),
            std::collections::HashMap::new(),
        ));

        info!("Core initialized successfully");

        Ok(Self {
            config,
            storage,
            auth,
            monitoring,
            providers,
            health_monitor,
            router,
        })
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get storage layer
    pub fn storage(&self) -> &crate::storage::StorageLayer {
        &self.storage
    }

    /// Get authentication system
    pub fn auth(&self) -> &crate::auth::AuthSystem {
        &self.auth
    }

    /// Get monitoring system
    pub fn monitoring(&self) -> &crate::monitoring::system::MonitoringSystem {
        &self.monitoring
    }

    /// Get the provider registry
    pub fn providers(&self) -> &providers::ProviderRegistry {
        &self.providers
    }

    /// Get the health monitor
    pub fn health_monitor(&self) -> &health::monitor::HealthMonitor {
        &self.health_monitor
    }

    /// Get the model router
    pub fn router(&self) -> &router::ModelRouter {
        &self.router
    }

    /// Graceful shutdown
    pub async fn shutdown(&self) -> Result<()> {
        info!("Shutting down Core");
        self.health_monitor.shutdown().await;
        self.storage.close().await?;
        info!("Core shutdown completed");
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<HealthStatus> {
        let mut status = HealthStatus {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
            components: std::collections::HashMap::new(),
        };

        match self.storage.health_check().await {
            Ok(_) => {
                status.components.insert(
                    "storage".to_string(),
                    ComponentHealth {
                        status: "healthy".to_string(),
                        message: None,
                    },
                );
            }
            Err(e) => {
                status.status = "unhealthy".to_string();
                status.components.insert(
                    "storage".to_string(),
                    ComponentHealth {
                        status: "unhealthy".to_string(),
                        message: Some(e.to_string()),
                    },
                );
            }
        }

        let provider_health = self.providers.len();
        status.components.insert(
            "providers".to_string(),
            ComponentHealth {
                status: "healthy".to_string(),
                message: Some(format!("{provider_health} provider(s) registered")),
            },
        );

        Ok(status)
    }
}

/// Health status response
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthStatus {
    /// Overall system status
    pub status: String,
    /// Timestamp when health was checked
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Health status of individual components
    pub components: std::collections::HashMap<String, ComponentHealth>,
}

/// Component health status
#[derive(Debug, Clone, serde::Serialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: String,
    /// Optional status message
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::config::Config;

    #[tokio::test]
    async fn test_core_creation() {
        let _config = Config::default();
        // Full construction requires a running storage/monitoring stack;
        // exercised in integration tests instead.
    }
}
