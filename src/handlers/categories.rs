use crate::error::ApiError;
use crate::handlers::{create_record, list_records};
use crate::schemas::{AppState, CreatedResponse, ErrorResponse};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use common::Category;
use serde_json::{Map, Value};
use tracing::instrument;

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = Category,
    responses(
        (status = 201, description = "Category created successfully", body = CreatedResponse),
        (status = 422, description = "Invalid category fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    create_record::<Category>(&state, payload).await
}

/// Get all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories, each with its `id`", body = [Category]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    list_records::<Category>(&state, Map::new(), None).await
}
