use crate::schemas::{AppState, DiagnosticResponse, MessageResponse};
use axum::{extract::State, response::Json};
use tracing::{debug, instrument, warn};

/// Partition names reported by the diagnostic endpoint
const MAX_REPORTED_PARTITIONS: u64 = 10;
/// Error text in the diagnostic is cut to this many characters
const MAX_ERROR_CHARS: usize = 80;

pub const LIVENESS_MESSAGE: &str = "Expense tracker backend running";

/// Liveness check
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = MessageResponse)
    )
)]
#[instrument]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: LIVENESS_MESSAGE.to_string(),
    })
}

/// Storage diagnostic
///
/// Always answers 200; storage problems show up in the status fields.
#[utoipa::path(
    get,
    path = "/test",
    tag = "health",
    responses(
        (status = 200, description = "Storage status", body = DiagnosticResponse)
    )
)]
#[instrument(skip(state))]
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticResponse> {
    let mut response = DiagnosticResponse {
        backend: "running".to_string(),
        database: "not available".to_string(),
        database_url: if state.database.url_set { "set" } else { "not set" }.to_string(),
        database_name: None,
        connection_status: "Not Connected".to_string(),
        connected: false,
        collections: Vec::new(),
    };

    if !state.store.is_connected() {
        warn!("Diagnostic requested without a database connection");
        return Json(response);
    }

    // Test database connection
    if let Err(e) = state.store.ping().await {
        warn!("Database ping failed: {}", e);
        response.database = format!("error: {}", truncate(&e.to_string(), MAX_ERROR_CHARS));
        return Json(response);
    }

    response.connected = true;
    response.connection_status = "Connected".to_string();
    response.database_name = state.database.name.clone();
    response.database = "available".to_string();

    match state.store.partitions(MAX_REPORTED_PARTITIONS).await {
        Ok(partitions) => {
            debug!("Database reports {} partitions", partitions.len());
            response.collections = partitions;
            response.database = "connected and working".to_string();
        }
        Err(e) => {
            warn!("Listing partitions failed: {}", e);
            response.database = format!(
                "connected but error: {}",
                truncate(&e.to_string(), MAX_ERROR_CHARS)
            );
        }
    }

    Json(response)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
