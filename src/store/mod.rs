//! # Page Store
//!
//! Storage abstraction for page documents. Handlers depend on the
//! [`PageStore`] trait only; the concrete backend (MongoDB, or the in-memory
//! store for tests and local development) is chosen at bootstrap and injected
//! behind an `Arc`.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{FieldSet, Page, PageContent};

pub mod memory;
pub mod mongo;

pub use memory::MemoryPageStore;
pub use mongo::MongoPageStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by page store backends
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Identifier string does not parse as a store id
    #[error("Invalid page id: {0}")]
    InvalidId(String),

    /// Store cannot be reached or did not answer within the deadline
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Insert or update rejected by the store
    #[error("Write failed: {0}")]
    WriteFailure(String),

    /// Stored document does not decode into the page shape
    #[error("Failed to decode stored page: {0}")]
    DecodeFailure(String),

    /// No page exists under the given id
    #[error("No page with id: {0}")]
    NotFound(String),
}

/// Storage backend for page documents.
///
/// Implementations are shared across request handlers behind an `Arc`; every
/// method takes `&self` and must tolerate concurrent calls. A failed call
/// reports its error and leaves the store as it was.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Insert a new page and return the store-assigned id as a hex string.
    async fn insert_page(&self, content: &PageContent) -> StoreResult<String>;

    /// Read every stored page, fully materialized, in store iteration order.
    /// Fails wholesale if any document does not decode into the page shape.
    async fn all_pages(&self) -> StoreResult<Vec<Page>>;

    /// Merge the given fields into the page with the given id. Fields not
    /// listed keep their stored values. An empty field set only checks that
    /// the page exists. Fails with `NotFound` when no page has that id.
    async fn apply_update(&self, id: &str, fields: &FieldSet) -> StoreResult<()>;

    /// Round-trip connectivity check against the backend.
    async fn ping(&self) -> StoreResult<()>;
}
