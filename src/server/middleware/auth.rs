//! Authentication middleware.
//!
//! Resolves the caller's identity once per request (via [`AuthSystem::authenticate`])
//! and stores it in the request's extensions so downstream handlers can pull it
//! out with [`get_request_context`] instead of re-parsing headers.

use crate::auth::AuthenticatedIdentity;
use crate::server::middleware::helpers::is_public_route;
use crate::server::state::AppState;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage, HttpRequest};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use tracing::debug;

/// Reads the [`AuthenticatedIdentity`] stashed in the request's extensions by
/// [`AuthMiddleware`]. Returns `None` for public routes or requests that
/// never carried credentials.
pub fn get_request_context(req: &HttpRequest) -> Option<AuthenticatedIdentity> {
    req.extensions().get::<AuthenticatedIdentity>().cloned()
}

/// Authenticates every request against `AppState::auth`, attaching the
/// resolved identity to the request. Public routes (health checks, login)
/// are allowed through without credentials.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let path = req.path().to_string();

        if is_public_route(&path) {
            return Box::pin(async move { service.call(req).await });
        }

        let app_state = req.app_data::<web::Data<AppState>>().cloned();
        let api_key = req
            .headers()
            .get(
                app_state
                    .as_ref()
                    .map(|s| s.auth.api_key_header().to_string())
                    .unwrap_or_else(|| "x-api-key".to_string()),
            )
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let authorization = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Box::pin(async move {
            if let Some(state) = app_state {
                match state
                    .auth
                    .authenticate(api_key.as_deref(), authorization.as_deref())
                    .await
                {
                    Ok(identity) => {
                        debug!(subject = %identity.subject, "request authenticated");
                        req.extensions_mut().insert(identity);
                    }
                    Err(e) => {
                        debug!(error = %e, path = %path, "request authentication failed");
                        return Err(actix_web::error::ErrorUnauthorized(e.to_string()));
                    }
                }
            }

            service.call(req).await
        })
    }
}
