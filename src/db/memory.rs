//! In-process document store with the same observable behaviour as the
//! MongoDB backend. Used by the test-suite; `run()` always uses MongoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{
    bson_to_json, CollectionKind, DeleteAck, DocumentStore, InsertAck, StoreError, UpdateAck,
};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionKind, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a read-only collection such as services or educations.
    pub async fn seed(
        &self,
        kind: CollectionKind,
        docs: Vec<Document>,
    ) -> Result<Vec<InsertAck>, StoreError> {
        let mut acks = Vec::with_capacity(docs.len());
        for doc in docs {
            acks.push(self.insert(kind, doc).await?);
        }
        Ok(acks)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_all(&self, kind: CollectionKind) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&kind).cloned().unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        kind: CollectionKind,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        let key = Bson::ObjectId(id);
        let collections = self.collections.read().await;
        Ok(collections
            .get(&kind)
            .and_then(|docs| docs.iter().find(|d| d.get("_id") == Some(&key)))
            .cloned())
    }

    async fn insert(&self, kind: CollectionKind, doc: Document) -> Result<InsertAck, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(kind).or_default();

        // `_id` leads the document, as the driver does when it generates one.
        let (id, stored) = match doc.get("_id").cloned() {
            Some(id) => (id, doc),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                let mut stored = doc! { "_id": id.clone() };
                for (key, value) in doc {
                    stored.insert(key, value);
                }
                (id, stored)
            }
        };

        if docs.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(StoreError::DuplicateKey {
                collection: kind,
                id: bson_to_json(id).to_string(),
            });
        }

        docs.push(stored);
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: bson_to_json(id),
        })
    }

    async fn upsert_fields(
        &self,
        kind: CollectionKind,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateAck, StoreError> {
        let target = Bson::ObjectId(id);
        let mut collections = self.collections.write().await;
        let docs = collections.entry(kind).or_default();

        if let Some(existing) = docs.iter_mut().find(|d| d.get("_id") == Some(&target)) {
            let mut modified = false;
            for (key, value) in fields {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let mut created = doc! { "_id": id };
        for (key, value) in fields {
            created.insert(key, value);
        }
        docs.push(created);

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(Value::String(id.to_hex())),
        })
    }

    async fn delete_by_id(
        &self,
        kind: CollectionKind,
        id: ObjectId,
    ) -> Result<DeleteAck, StoreError> {
        let key = Bson::ObjectId(id);
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(&kind) {
            Some(docs) => match docs.iter().position(|d| d.get("_id") == Some(&key)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteAck {
            acknowledged: true,
            deleted_count,
        })
    }
}
