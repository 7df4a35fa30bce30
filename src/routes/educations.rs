/**
 * Education Routes
 * Read-only listing of the educations collection
 */
use axum::{extract::State, Json};
use serde_json::Value;

use crate::db::CollectionKind;
use crate::routes::{collection, ApiError};
use crate::AppState;

/// GET /api/v1/educations
pub async fn list_educations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    collection::list(&state, CollectionKind::Educations).await
}
