//! `GET /models`, `GET /models/{id}`, `GET /models/provider/{name}`.

use crate::core::types::common::ModelInfo;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;

#[derive(Deserialize)]
struct ModelIdPath {
    id: String,
}

#[derive(Deserialize)]
struct ProviderNamePath {
    name: String,
}

/// List every model known to every registered provider.
pub async fn list_models(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let models: Vec<&ModelInfo> = state
        .router
        .all()
        .into_iter()
        .flat_map(|p| p.list_models())
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(models)))
}

/// Model detail lookup by id, searching across all registered providers.
pub async fn get_model(
    state: web::Data<AppState>,
    path: web::Path<ModelIdPath>,
) -> ActixResult<HttpResponse> {
    let model = state
        .router
        .all()
        .into_iter()
        .flat_map(|p| p.list_models())
        .find(|m| m.id == path.id);

    match model {
        Some(model) => Ok(HttpResponse::Ok().json(ApiResponse::success(model))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(format!(
            "no model '{}'",
            path.id
        )))),
    }
}

/// Models offered by a single provider.
pub async fn list_models_by_provider(
    state: web::Data<AppState>,
    path: web::Path<ProviderNamePath>,
) -> ActixResult<HttpResponse> {
    match state.router.get(&path.name) {
        Some(provider) => Ok(HttpResponse::Ok().json(ApiResponse::success(provider.list_models()))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(format!(
            "no provider '{}'",
            path.name
        )))),
    }
}
