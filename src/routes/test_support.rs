//! Request helpers for handler tests: the real router over a `MemoryStore`,
//! or over a store that fails every call.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mongodb::bson::{oid::ObjectId, Document};
use serde_json::Value;
use tower::ServiceExt;

use crate::db::{
    CollectionKind, DeleteAck, DocumentStore, InsertAck, MemoryStore, StoreError, UpdateAck,
};
use crate::{create_app, AppState};

pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = create_app(AppState::new(store.clone()));
    (app, store)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    json: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match json {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, req).await
}

pub async fn send_request(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn inserted_id(ack: &Value) -> String {
    ack["insertedId"].as_str().unwrap().to_string()
}

/// A store whose every operation fails, as when the database goes away.
pub struct UnavailableStore;

fn unavailable<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn ping(&self) -> Result<(), StoreError> {
        unavailable()
    }

    async fn find_all(&self, _kind: CollectionKind) -> Result<Vec<Document>, StoreError> {
        unavailable()
    }

    async fn find_by_id(
        &self,
        _kind: CollectionKind,
        _id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        unavailable()
    }

    async fn insert(&self, _kind: CollectionKind, _doc: Document) -> Result<InsertAck, StoreError> {
        unavailable()
    }

    async fn upsert_fields(
        &self,
        _kind: CollectionKind,
        _id: ObjectId,
        _fields: Document,
    ) -> Result<UpdateAck, StoreError> {
        unavailable()
    }

    async fn delete_by_id(
        &self,
        _kind: CollectionKind,
        _id: ObjectId,
    ) -> Result<DeleteAck, StoreError> {
        unavailable()
    }
}

pub fn unavailable_app() -> Router {
    create_app(AppState::new(Arc::new(UnavailableStore)))
}

/// Asserts the uniform store-failure response.
pub fn assert_internal_error(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, &serde_json::json!({ "error": "Internal server error" }));
}
