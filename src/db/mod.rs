pub mod memory;
pub mod models;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub uri: String,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "myPortfolio".to_string()),
        }
    }
}

/// The collections served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Services,
    Projects,
    Educations,
    Skills,
    Blogs,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 5] = [
        CollectionKind::Services,
        CollectionKind::Projects,
        CollectionKind::Educations,
        CollectionKind::Skills,
        CollectionKind::Blogs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::Services => "services",
            CollectionKind::Projects => "projects",
            CollectionKind::Educations => "educations",
            CollectionKind::Skills => "skills",
            CollectionKind::Blogs => "blogs",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),
    /// The backend could not serve the operation at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("duplicate _id {id} in collection {collection}")]
    DuplicateKey {
        collection: CollectionKind,
        id: String,
    },
}

/// Acknowledgement of a single-document insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

/// Acknowledgement of a single-document update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Value>,
}

/// Acknowledgement of a single-document delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<InsertOneResult> for InsertAck {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: bson_to_json(result.inserted_id),
        }
    }
}

impl From<UpdateResult> for UpdateAck {
    fn from(result: UpdateResult) -> Self {
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.map(bson_to_json),
        }
    }
}

impl From<DeleteResult> for DeleteAck {
    fn from(result: DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}

/// One operation per route. Implementations must be safe to share across
/// concurrently running handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    /// Every document of the collection, in the store's natural order.
    async fn find_all(&self, kind: CollectionKind) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(
        &self,
        kind: CollectionKind,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError>;

    async fn insert(&self, kind: CollectionKind, doc: Document) -> Result<InsertAck, StoreError>;

    /// `$set` the given fields on the document with `_id == id`, creating it
    /// when absent.
    async fn upsert_fields(
        &self,
        kind: CollectionKind,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateAck, StoreError>;

    async fn delete_by_id(&self, kind: CollectionKind, id: ObjectId)
        -> Result<DeleteAck, StoreError>;
}

/// Render a BSON value as the JSON the API hands out: ObjectIds as hex
/// strings, dates as RFC 3339, everything else as relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}
