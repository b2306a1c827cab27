//! # In-Memory Page Store
//!
//! `Vec`-backed [`PageStore`] used by tests and the `memory` backend for
//! local development. Documents are kept in the same shape the MongoDB
//! backend stores them (`_id` hex string plus wire-named fields), so id
//! handling and merge-update semantics match the real backend.

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};

use crate::model::{FieldSet, Page, PageContent};

use super::{PageStore, StoreError, StoreResult};

/// In-memory page store.
///
/// In production the MongoDB backend takes its place behind the same trait.
pub struct MemoryPageStore {
    /// Stored documents, in insertion order
    documents: RwLock<Vec<Value>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Start from pre-built documents. Test hook: lets a test plant a
    /// document the page shape cannot decode.
    pub fn seed(documents: Vec<Value>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }
}

impl Default for MemoryPageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn insert_page(&self, content: &PageContent) -> StoreResult<String> {
        let id = ObjectId::new().to_hex();

        let mut document = serde_json::to_value(content)
            .map_err(|e| StoreError::WriteFailure(e.to_string()))?;
        if let Some(object) = document.as_object_mut() {
            object.insert("_id".to_string(), json!(id));
        }

        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        documents.push(document);

        Ok(id)
    }

    async fn all_pages(&self) -> StoreResult<Vec<Page>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let mut pages = Vec::with_capacity(documents.len());
        for document in documents.iter() {
            pages.push(decode_page(document)?);
        }

        Ok(pages)
    }

    async fn apply_update(&self, id: &str, fields: &FieldSet) -> StoreResult<()> {
        ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))?;

        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let document = documents
            .iter_mut()
            .find(|d| d.get("_id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Stage the merge and swap it in whole; a failing field must not
        // leave a partial write behind.
        let mut staged = document.clone();
        for (path, value) in fields.iter() {
            set_field(&mut staged, path, value.clone())?;
        }
        *document = staged;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Decode one stored document into a `Page`.
fn decode_page(document: &Value) -> StoreResult<Page> {
    let id = document
        .get("_id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::DecodeFailure("document has no _id".to_string()))?
        .to_string();

    let mut fields = document.clone();
    if let Some(object) = fields.as_object_mut() {
        object.remove("_id");
    }
    let content: PageContent =
        serde_json::from_value(fields).map_err(|e| StoreError::DecodeFailure(e.to_string()))?;

    Ok(Page { id, content })
}

/// Set one dotted-path field, creating intermediate objects as needed.
fn set_field(target: &mut Value, path: &str, value: Value) -> StoreResult<()> {
    let object = target.as_object_mut().ok_or_else(|| {
        StoreError::WriteFailure(format!("cannot set '{path}' through a non-object value"))
    })?;

    match path.split_once('.') {
        None => {
            object.insert(path.to_string(), value);
            Ok(())
        }
        Some((head, rest)) => {
            let child = object
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            set_field(child, rest, value)
        }
    }
}
