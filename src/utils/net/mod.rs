//! Network and Client utilities
//!
//! This module provides HTTP client management, rate limiting, and network utilities.

pub mod client;
pub mod http;
pub mod limiter;

// Re-export commonly used types and functions
pub use client::types::{HttpClientConfig, RequestMetrics, RetryConfig};
pub use client::utils::ClientUtils;
pub use http::*;
pub use limiter::*;
