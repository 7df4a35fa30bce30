//! MongoDB-backed document store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Client, Collection, Database,
};

use super::{
    CollectionKind, DbConfig, DeleteAck, DocumentStore, InsertAck, StoreError, UpdateAck,
};

/// One client for the process lifetime, one collection handle per kind.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
    services: Collection<Document>,
    projects: Collection<Document>,
    educations: Collection<Document>,
    skills: Collection<Document>,
    blogs: Collection<Document>,
}

impl MongoStore {
    /// Open the client and verify the server answers a `ping` before any
    /// route is served.
    pub async fn connect(config: &DbConfig) -> Result<Self, StoreError> {
        tracing::info!(database = %config.database, "Connecting to MongoDB...");

        let client = Client::with_uri_str(&config.uri).await?;
        let store = Self::from_database(client.database(&config.database));
        store.ping().await?;

        tracing::info!("Connected to MongoDB");
        Ok(store)
    }

    pub fn from_database(database: Database) -> Self {
        Self {
            services: database.collection(CollectionKind::Services.name()),
            projects: database.collection(CollectionKind::Projects.name()),
            educations: database.collection(CollectionKind::Educations.name()),
            skills: database.collection(CollectionKind::Skills.name()),
            blogs: database.collection(CollectionKind::Blogs.name()),
            database,
        }
    }

    fn collection(&self, kind: CollectionKind) -> &Collection<Document> {
        match kind {
            CollectionKind::Services => &self.services,
            CollectionKind::Projects => &self.projects,
            CollectionKind::Educations => &self.educations,
            CollectionKind::Skills => &self.skills,
            CollectionKind::Blogs => &self.blogs,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn find_all(&self, kind: CollectionKind) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(kind).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(
        &self,
        kind: CollectionKind,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(kind).find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, kind: CollectionKind, doc: Document) -> Result<InsertAck, StoreError> {
        let result = self.collection(kind).insert_one(doc).await?;
        Ok(result.into())
    }

    async fn upsert_fields(
        &self,
        kind: CollectionKind,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateAck, StoreError> {
        // Older servers reject an empty `$set`; re-setting `_id` to its own
        // value is a no-op that still lets the upsert create the document.
        let set = if fields.is_empty() {
            doc! { "_id": id }
        } else {
            fields
        };

        let result = self
            .collection(kind)
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .upsert(true)
            .await?;
        Ok(result.into())
    }

    async fn delete_by_id(
        &self,
        kind: CollectionKind,
        id: ObjectId,
    ) -> Result<DeleteAck, StoreError> {
        let result = self.collection(kind).delete_one(doc! { "_id": id }).await?;
        Ok(result.into())
    }
}
