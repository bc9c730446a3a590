pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod health;

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json};
use common::{Record, to_transport_all};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::schemas::{AppState, CreatedResponse};

/// Validate `payload` as `R`, store it and answer with the new identifier.
pub(crate) async fn create_record<R: Record>(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(payload) = payload.inspect_err(|e| warn!("Rejected {} body: {}", R::PARTITION, e))?;

    let record = R::from_payload(&payload).inspect_err(|failure| {
        warn!(
            "Invalid {} payload: {:?}",
            R::PARTITION,
            failure.violations()
        )
    })?;
    let fields = record.to_fields()?;

    match state.store.insert(R::PARTITION, fields).await {
        Ok(id) => {
            info!("{} created with ID: {}", R::PARTITION, id);
            Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
        }
        Err(e) => {
            error!("Failed to create {}: {}", R::PARTITION, e);
            Err(e.into())
        }
    }
}

/// List documents of `R`'s partition in their transport form.
pub(crate) async fn list_records<R: Record>(
    state: &AppState,
    filter: Map<String, Value>,
    limit: Option<u64>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    debug!("Listing {} documents, filter: {:?}, limit: {:?}", R::PARTITION, filter, limit);

    match state.store.find(R::PARTITION, &filter, limit).await {
        Ok(documents) => {
            info!("Retrieved {} {} documents", documents.len(), R::PARTITION);
            Ok(Json(to_transport_all(documents)))
        }
        Err(e) => {
            error!("Failed to list {} documents: {}", R::PARTITION, e);
            Err(e.into())
        }
    }
}
