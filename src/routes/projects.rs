/**
 * Project Routes
 * CRUD API endpoints for portfolio projects
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::db::{
    models::{Entity, ProjectFields},
    DeleteAck, InsertAck, UpdateAck,
};
use crate::routes::{collection, ApiError, ApiJson};
use crate::AppState;

/// GET /api/v1/projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    collection::list(&state, ProjectFields::KIND).await
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    collection::fetch_one(&state, ProjectFields::KIND, ProjectFields::LABEL, &id).await
}

/// POST /api/v1/projects - insert the known project fields as a new document
pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProjectFields>,
) -> Result<(StatusCode, Json<InsertAck>), ApiError> {
    collection::create_entity(&state, &payload).await
}

/// PUT /api/v1/projects/{id} - set the given fields, creating the project if absent
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ProjectFields>,
) -> Result<Json<UpdateAck>, ApiError> {
    collection::upsert(&state, &id, &payload).await
}

/// DELETE /api/v1/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    collection::remove(&state, ProjectFields::KIND, &id).await
}
