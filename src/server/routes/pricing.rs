//! Model pricing endpoints

#![allow(dead_code)]

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::debug;

/// Configure pricing routes
pub fn configure_pricing_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pricing").route("/{model_id}", web::get().to(get_model_pricing)),
    );
}

#[derive(Deserialize)]
struct ModelIdPath {
    model_id: String,
}

/// Get the cost rates for a single model id.
async fn get_model_pricing(
    state: web::Data<AppState>,
    path: web::Path<ModelIdPath>,
) -> ActixResult<HttpResponse> {
    debug!("Pricing lookup requested for {}", path.model_id);

    match state.pricing.rates_for(&path.model_id).await {
        Some(rates) => Ok(HttpResponse::Ok().json(ApiResponse::success(rates))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(format!(
            "no pricing data for model '{}'",
            path.model_id
        )))),
    }
}
