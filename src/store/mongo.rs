//! # MongoDB Page Store
//!
//! [`PageStore`] backed by one MongoDB collection. Pages are stored as plain
//! documents under a store-assigned `ObjectId`; the id crosses the trait
//! boundary as its 24-char hex encoding. Every driver call runs under the
//! configured deadline so a stalled store surfaces as `Unavailable` instead
//! of hanging the request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use crate::config::StoreConfig;
use crate::model::{FieldSet, Page, PageContent};

use super::{PageStore, StoreError, StoreResult};

/// MongoDB-backed page store.
pub struct MongoPageStore {
    database: Database,
    collection: Collection<Document>,
    op_timeout: Duration,
}

impl MongoPageStore {
    /// Connect to the configured store and verify it answers a ping.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        options.app_name = Some("markermap".to_string());
        options.connect_timeout = Some(config.timeout());
        options.server_selection_timeout = Some(config.timeout());

        let client =
            Client::with_options(options).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let database = client.database(&config.database);

        let store = Self {
            collection: database.collection::<Document>(&config.collection),
            database,
            op_timeout: config.timeout(),
        };
        store.ping().await?;

        tracing::info!(
            "connected to document store (database {}, collection {})",
            config.database,
            config.collection
        );
        Ok(store)
    }

    /// Run one store call under the operation deadline.
    async fn bounded<T, F>(&self, op: &'static str, call: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Unavailable(format!(
                "{op} exceeded the {}s deadline",
                self.op_timeout.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl PageStore for MongoPageStore {
    async fn insert_page(&self, content: &PageContent) -> StoreResult<String> {
        let document =
            bson::to_document(content).map_err(|e| StoreError::WriteFailure(e.to_string()))?;

        let result = self
            .bounded("insert page", async {
                self.collection
                    .insert_one(document, None)
                    .await
                    .map_err(write_error)
            })
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::WriteFailure("store returned a non-object id".to_string()))?;
        Ok(id.to_hex())
    }

    async fn all_pages(&self) -> StoreResult<Vec<Page>> {
        self.bounded("read pages", async {
            let mut cursor = self
                .collection
                .find(doc! {}, None)
                .await
                .map_err(read_error)?;

            let mut pages = Vec::new();
            while let Some(document) = cursor.try_next().await.map_err(read_error)? {
                pages.push(decode_document(document)?);
            }
            Ok(pages)
        })
        .await
    }

    async fn apply_update(&self, id: &str, fields: &FieldSet) -> StoreResult<()> {
        let object_id = parse_object_id(id)?;
        let filter = doc! {"_id": object_id};

        if fields.is_empty() {
            // An empty merge is not a valid store command; only check that
            // the page exists.
            let count = self
                .bounded("check page", async {
                    self.collection
                        .count_documents(filter, None)
                        .await
                        .map_err(read_error)
                })
                .await?;
            if count == 0 {
                return Err(StoreError::NotFound(id.to_string()));
            }
            return Ok(());
        }

        let update = update_document(fields)?;
        let result = self
            .bounded("update page", async {
                self.collection
                    .update_one(filter, update, None)
                    .await
                    .map_err(write_error)
            })
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.bounded("ping", async {
            self.database
                .run_command(doc! {"ping": 1}, None)
                .await
                .map(|_| ())
                .map_err(|e| StoreError::Unavailable(e.to_string()))
        })
        .await
    }
}

/// Parse the canonical hex encoding into a store id.
fn parse_object_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Decode one stored document into a `Page`.
fn decode_document(mut document: Document) -> StoreResult<Page> {
    let id = document
        .get_object_id("_id")
        .map_err(|_| StoreError::DecodeFailure("document has no object id".to_string()))?
        .to_hex();
    document.remove("_id");

    let content: PageContent =
        bson::from_document(document).map_err(|e| StoreError::DecodeFailure(e.to_string()))?;
    Ok(Page { id, content })
}

/// Build the merge command from a flattened field set.
fn update_document(fields: &FieldSet) -> StoreResult<Document> {
    let mut set = Document::new();
    for (path, value) in fields.iter() {
        let value = bson::to_bson(value).map_err(|e| StoreError::WriteFailure(e.to_string()))?;
        set.insert(path, value);
    }
    Ok(doc! {"$set": set})
}

/// Driver errors on the read path. Shape problems are raised separately by
/// `decode_document`, so whatever the driver reports here means the store
/// could not serve the scan.
fn read_error(err: mongodb::error::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

/// Driver errors on the write path: connectivity maps to `Unavailable`,
/// anything the server itself rejected maps to `WriteFailure`.
fn write_error(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::WriteFailure(err.to_string()),
    }
}
