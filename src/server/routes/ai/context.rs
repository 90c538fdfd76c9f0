//! Shared auth/context helpers for the gateway API handlers.

use crate::auth::AuthenticatedIdentity;
use crate::core::models::RequestContext;
use crate::server::middleware::get_request_context as authenticated_identity;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::HttpRequest;
use tracing::info;

/// Build a fresh [`RequestContext`] (request id, client IP, user agent) for
/// this request. Distinct from [`get_authenticated_user`] — this carries
/// request metadata, not credentials.
pub fn get_request_context(req: &HttpRequest) -> RequestContext {
    let client_ip = req.connection_info().peer_addr().map(|s| s.to_string());
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    RequestContext::new().with_client_info(client_ip, user_agent)
}

/// The identity [`crate::server::middleware::AuthMiddleware`] resolved for
/// this request, if any.
pub fn get_authenticated_user(req: &HttpRequest) -> Option<AuthenticatedIdentity> {
    authenticated_identity(req)
}

/// The raw API key header value, if the request carried one. Used for
/// usage logging where the identity lookup itself isn't needed.
pub fn get_authenticated_api_key(req: &HttpRequest, state: &AppState) -> Option<String> {
    req.headers()
        .get(state.auth.api_key_header())
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Require that the caller carries `required_role`, per `AppState::auth`'s
/// RBAC policy.
pub fn check_permission(req: &HttpRequest, state: &AppState, required_role: &str) -> Result<()> {
    let identity = get_authenticated_user(req)
        .ok_or_else(|| GatewayError::Auth("missing credentials".to_string()))?;

    if state.auth.check_permission(&identity, required_role) {
        Ok(())
    } else {
        Err(GatewayError::Authorization(format!(
            "subject '{}' lacks role '{required_role}'",
            identity.subject
        )))
    }
}

/// Record a completed API call. Usage accounting itself (cost, quota) is
/// handled by the completion/embedding pipelines; this just traces the
/// call for observability.
pub fn log_api_usage(context: &RequestContext, model: &str, status: &str) {
    info!(
        request_id = %context.request_id,
        model,
        status,
        "api request completed"
    );
}
