/**
 * Collection Handlers
 * The single store call behind each route, shared by every resource
 */
use axum::{http::StatusCode, Json};
use mongodb::bson::{self, oid::ObjectId, Document};
use serde_json::{Map, Value};

use crate::db::{
    document_to_json, models::Entity, CollectionKind, DeleteAck, InsertAck, UpdateAck,
};
use crate::routes::ApiError;
use crate::AppState;

pub fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidIdentifier(raw.to_string()))
}

/// Encode a JSON object body into a BSON document as-is.
pub fn body_to_document(body: Map<String, Value>) -> Result<Document, ApiError> {
    bson::to_document(&body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn entity_to_document<E: Entity>(fields: &E) -> Result<Document, ApiError> {
    fields
        .to_document()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub async fn list(state: &AppState, kind: CollectionKind) -> Result<Json<Vec<Value>>, ApiError> {
    let docs = state.store.find_all(kind).await?;
    tracing::debug!(collection = %kind, count = docs.len(), "listed documents");
    Ok(Json(docs.into_iter().map(document_to_json).collect()))
}

pub async fn fetch_one(
    state: &AppState,
    kind: CollectionKind,
    label: &'static str,
    raw_id: &str,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(raw_id)?;
    match state.store.find_by_id(kind, id).await? {
        Some(doc) => Ok(Json(document_to_json(doc))),
        None => Err(ApiError::NotFound(label)),
    }
}

pub async fn create(
    state: &AppState,
    kind: CollectionKind,
    doc: Document,
) -> Result<(StatusCode, Json<InsertAck>), ApiError> {
    let ack = state.store.insert(kind, doc).await?;
    tracing::info!(collection = %kind, id = %ack.inserted_id, "document inserted");
    Ok((StatusCode::CREATED, Json(ack)))
}

pub async fn create_entity<E: Entity>(
    state: &AppState,
    fields: &E,
) -> Result<(StatusCode, Json<InsertAck>), ApiError> {
    create(state, E::KIND, entity_to_document(fields)?).await
}

pub async fn upsert<E: Entity>(
    state: &AppState,
    raw_id: &str,
    fields: &E,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(raw_id)?;
    let kind = E::KIND;
    let ack = state
        .store
        .upsert_fields(kind, id, entity_to_document(fields)?)
        .await?;
    tracing::info!(
        collection = %kind,
        id = %id,
        matched = ack.matched_count,
        upserted = ack.upserted_count,
        "document updated"
    );
    Ok(Json(ack))
}

pub async fn remove(
    state: &AppState,
    kind: CollectionKind,
    raw_id: &str,
) -> Result<Json<DeleteAck>, ApiError> {
    let id = parse_id(raw_id)?;
    let ack = state.store.delete_by_id(kind, id).await?;
    tracing::info!(collection = %kind, id = %id, deleted = ack.deleted_count, "document deleted");
    Ok(Json(ack))
}
