/**
 * Blog Routes
 * CRUD API endpoints for blog entries
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};

use crate::db::{
    models::{BlogFields, Entity},
    DeleteAck, InsertAck, UpdateAck,
};
use crate::routes::{collection, ApiError, ApiJson};
use crate::AppState;

/// POST /api/v1/blogs - the body is stored verbatim
pub async fn create_blog(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<(StatusCode, Json<InsertAck>), ApiError> {
    let doc = collection::body_to_document(body)?;
    collection::create(&state, BlogFields::KIND, doc).await
}

/// GET /api/v1/blogs
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    collection::list(&state, BlogFields::KIND).await
}

/// GET /api/v1/blogs/{id}
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    collection::fetch_one(&state, BlogFields::KIND, BlogFields::LABEL, &id).await
}

/// PUT /api/v1/blogs/{id}
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<BlogFields>,
) -> Result<Json<UpdateAck>, ApiError> {
    collection::upsert(&state, &id, &payload).await
}

/// DELETE /api/v1/blogs/{id}
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    collection::remove(&state, BlogFields::KIND, &id).await
}
