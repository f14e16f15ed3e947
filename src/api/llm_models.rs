//! `/api/llm-models` endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, LlmModelResponse, ModelId, Pagination};
use crate::domain::{CreateModelConfiguration, UpdateModelConfiguration};

/// Collection path; every route is also served with a trailing slash
pub const LLM_MODELS_PATH: &str = "/api/llm-models";

/// Create the llm-models router
pub fn create_llm_models_router() -> Router<AppState> {
    Router::new()
        .route(LLM_MODELS_PATH, get(list_llm_models).post(create_llm_model))
        .route(
            &format!("{LLM_MODELS_PATH}/"),
            get(list_llm_models).post(create_llm_model),
        )
        .route(
            &format!("{LLM_MODELS_PATH}/{{model_id}}"),
            get(get_llm_model)
                .put(update_llm_model)
                .delete(delete_llm_model),
        )
        .route(
            &format!("{LLM_MODELS_PATH}/{{model_id}}/"),
            get(get_llm_model)
                .put(update_llm_model)
                .delete(delete_llm_model),
        )
}

/// POST /api/llm-models/
pub async fn create_llm_model(
    State(state): State<AppState>,
    Json(request): Json<CreateModelConfiguration>,
) -> Result<(StatusCode, Json<LlmModelResponse>), ApiError> {
    debug!(name = %request.name, model_type = %request.model_type, "Creating LLM model");

    let record = state.model_configuration_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(LlmModelResponse::from(record))))
}

/// GET /api/llm-models/?page=&size=
pub async fn list_llm_models(
    State(state): State<AppState>,
    pagination: Pagination,
) -> Result<Json<Vec<LlmModelResponse>>, ApiError> {
    debug!(
        offset = pagination.offset,
        limit = pagination.limit,
        "Listing LLM models"
    );

    let records = state
        .model_configuration_service
        .list(pagination.offset, pagination.limit)
        .await?;

    Ok(Json(records.into_iter().map(LlmModelResponse::from).collect()))
}

/// GET /api/llm-models/{model_id}
pub async fn get_llm_model(
    State(state): State<AppState>,
    ModelId(id): ModelId,
) -> Result<Json<LlmModelResponse>, ApiError> {
    debug!(id, "Getting LLM model");

    let record = state
        .model_configuration_service
        .get(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(LlmModelResponse::from(record)))
}

/// PUT /api/llm-models/{model_id}
pub async fn update_llm_model(
    State(state): State<AppState>,
    ModelId(id): ModelId,
    Json(request): Json<UpdateModelConfiguration>,
) -> Result<Json<LlmModelResponse>, ApiError> {
    debug!(id, "Updating LLM model");

    let record = state
        .model_configuration_service
        .update(id, request)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(LlmModelResponse::from(record)))
}

/// DELETE /api/llm-models/{model_id}
pub async fn delete_llm_model(
    State(state): State<AppState>,
    ModelId(id): ModelId,
) -> Result<StatusCode, ApiError> {
    debug!(id, "Deleting LLM model");

    if state.model_configuration_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found())
    }
}
