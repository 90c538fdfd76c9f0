//! Authentication endpoints: API key issuance and JWT login.

#![allow(dead_code)]

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configure auth routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/api-keys", web::post().to(issue_api_key))
            .route("/token", web::post().to(issue_token))
            .route("/whoami", web::get().to(whoami)),
    );
}

#[derive(Deserialize)]
struct IssueCredentialRequest {
    subject: String,
    #[serde(default)]
    roles: Vec<String>,
}

#[derive(Serialize)]
struct ApiKeyResponse {
    api_key: String,
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
}

#[derive(Serialize)]
struct WhoAmIResponse {
    subject: String,
    roles: Vec<String>,
}

/// Issue a new API key for a subject.
async fn issue_api_key(
    state: web::Data<AppState>,
    body: web::Json<IssueCredentialRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Issuing API key for {}", body.subject);

    match state
        .auth
        .issue_api_key(&body.subject, body.roles.clone())
        .await
    {
        Ok(api_key) => Ok(HttpResponse::Ok().json(ApiResponse::success(ApiKeyResponse { api_key }))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string()))),
    }
}

/// Mint a bearer JWT for a subject.
async fn issue_token(
    state: web::Data<AppState>,
    body: web::Json<IssueCredentialRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Issuing JWT for {}", body.subject);

    match state.auth.issue_jwt(&body.subject, body.roles.clone()) {
        Ok(token) => Ok(HttpResponse::Ok().json(ApiResponse::success(TokenResponse { token }))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string()))),
    }
}

/// Resolve the identity behind the request's credentials.
async fn whoami(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    let api_key = req
        .headers()
        .get(state.auth.api_key_header())
        .and_then(|v| v.to_str().ok());
    let authorization = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    match state.auth.authenticate(api_key, authorization).await {
        Ok(identity) => Ok(HttpResponse::Ok().json(ApiResponse::success(WhoAmIResponse {
            subject: identity.subject,
            roles: identity.roles,
        }))),
        Err(e) => Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error(e.to_string()))),
    }
}
