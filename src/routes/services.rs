/**
 * Service Routes
 * Read-only listing of the services collection
 */
use axum::{extract::State, Json};
use serde_json::Value;

use crate::db::CollectionKind;
use crate::routes::{collection, ApiError};
use crate::AppState;

/// GET /api/v1/services
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    collection::list(&state, CollectionKind::Services).await
}
