//! `POST /embeddings`.

use super::context::{get_authenticated_user, get_request_context, log_api_usage};
use crate::core::providers::Provider;
use crate::core::types::common::RequestContext as ProviderRequestContext;
use crate::core::types::requests::{EmbeddingInput, EmbeddingRequest};
use crate::core::types::responses::EmbeddingResponse;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result as GatewayResult};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddingRequestBody {
    model_id: String,
    input: EmbeddingInput,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    encoding_format: Option<String>,
    #[serde(default)]
    dimensions: Option<u32>,
}

/// Split `"<provider>/<model>"`; models with no explicit provider resolve by
/// capability search over the registry.
fn resolve_provider<'a>(
    registry: &'a crate::core::providers::ProviderRegistry,
    model: &str,
) -> GatewayResult<(&'a Provider, String)> {
    if let Some((provider_name, bare_model)) = model.split_once('/') {
        if let Some(provider) = registry.get(provider_name) {
            return Ok((provider, bare_model.to_string()));
        }
    }

    registry
        .find_supporting_model(model)
        .into_iter()
        .next()
        .map(|p| (p, model.to_string()))
        .ok_or_else(|| GatewayError::NoProvidersAvailable(format!("no provider for model '{model}'")))
}

/// `POST /embeddings` — create embeddings for one or more inputs, preserving
/// the order of `input`.
pub async fn embeddings(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<EmbeddingRequestBody>,
) -> GatewayResult<HttpResponse> {
    get_authenticated_user(&req)
        .ok_or_else(|| GatewayError::Auth("missing credentials".to_string()))?;
    let context = get_request_context(&req);

    let body = body.into_inner();
    let (provider, bare_model) = resolve_provider(&state.router, &body.model_id)?;

    let request = EmbeddingRequest {
        model: bare_model,
        input: body.input,
        user: body.user,
        encoding_format: body.encoding_format,
        dimensions: body.dimensions,
        task_type: None,
    };

    let response = provider
        .create_embeddings(request, ProviderRequestContext::default())
        .await
        .map_err(GatewayError::Provider);

    match response {
        Ok(response) => {
            log_api_usage(&context, &body.model_id, "ok");
            Ok(HttpResponse::Ok().json(EmbeddingResponseBody::from(response)))
        }
        Err(e) => {
            log_api_usage(&context, &body.model_id, "error");
            Err(e)
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddingResponseBody {
    object: String,
    data: Vec<crate::core::types::responses::EmbeddingData>,
    model_id: String,
    usage: Option<crate::core::types::responses::Usage>,
}

impl From<EmbeddingResponse> for EmbeddingResponseBody {
    fn from(response: EmbeddingResponse) -> Self {
        Self {
            object: response.object,
            data: response.data,
            model_id: response.model,
            usage: response.usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_input() {
        let body: EmbeddingRequestBody =
            serde_json::from_str(r#"{"modelId":"text-embedding-3-small","input":"hello"}"#)
                .unwrap();
        assert_eq!(body.model_id, "text-embedding-3-small");
        assert!(matches!(body.input, EmbeddingInput::Text(_)));
    }
}
