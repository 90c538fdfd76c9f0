//! Gateway API endpoints, versioned under `/api/v1`.
//!
//! Route surface: unary and streaming completions, embeddings, and model
//! listing/detail — the HTTP surface named in spec §6. Non-goals (audio,
//! image generation, a separate `/chat/completions` path) are intentionally
//! absent rather than stubbed.

#![allow(dead_code)]

mod completions;
mod context;
mod embeddings;
mod models;

pub use completions::{completions, completions_stream};
pub use context::{
    check_permission, get_authenticated_api_key, get_authenticated_user, get_request_context,
    log_api_usage,
};
pub use embeddings::embeddings;
pub use models::{get_model, list_models, list_models_by_provider};

use actix_web::web;

/// Configure the gateway's versioned API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/completions", web::post().to(completions))
            .route("/completions/stream", web::post().to(completions_stream))
            .route("/embeddings", web::post().to(embeddings))
            .route("/models", web::get().to(list_models))
            .route("/models/provider/{name}", web::get().to(list_models_by_provider))
            .route("/models/{id}", web::get().to(get_model)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RequestContext;

    #[test]
    fn request_context_defaults() {
        let context = RequestContext::new();
        assert!(!context.request_id.is_empty());
        assert!(context.user_agent.is_none());
    }
}
