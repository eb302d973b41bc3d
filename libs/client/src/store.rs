//! The store seam the service layer depends on.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::{Result, SearchQuery};

/// Remote clinical document store.
///
/// Documents are raw JSON values; ids are store-assigned on `create` and
/// immutable afterwards. Implementations do not retry - the caller decides
/// what is best-effort.
#[async_trait]
pub trait FhirStore: Send + Sync {
    /// Persist a new document; the response carries the assigned id.
    async fn create(&self, resource_type: &str, document: JsonValue) -> Result<JsonValue>;

    /// Fetch a document by id. `Ok(None)` when the store has no such id.
    async fn read(&self, resource_type: &str, id: &str) -> Result<Option<JsonValue>>;

    /// Replace the document with the given id, which must already exist.
    async fn update(&self, resource_type: &str, id: &str, document: JsonValue)
        -> Result<JsonValue>;

    /// Delete by kind and id.
    async fn delete(&self, resource_type: &str, id: &str) -> Result<()>;

    /// Run a structured query and return the matching documents in order.
    async fn search(&self, resource_type: &str, query: &SearchQuery) -> Result<Vec<JsonValue>>;
}
