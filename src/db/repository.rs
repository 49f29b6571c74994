//! Store traits for data access abstraction.
//!
//! These traits define the contract required of any backing document store,
//! allowing different storage backends to be swapped without changing the
//! facade or the controllers built on it.

use std::future::Future;

#[cfg(test)]
use mockall::automock;

use crate::db::{Document, DocumentId, FieldPath, Fields, Filter, StoreResult, TextRange};

/// Document-collection capabilities of a backing store.
///
/// Every method performs one round trip against the store.
#[cfg_attr(test, automock)]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document, returning the id the store assigned to it.
    fn insert(
        &self,
        collection: &str,
        fields: &Fields,
    ) -> impl Future<Output = StoreResult<DocumentId>> + Send;

    /// Get a document by id, `None` when absent.
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = StoreResult<Option<Document>>> + Send;

    /// Get every document, in insertion order or ascending by `order_by`.
    ///
    /// When ordering by a field, documents lacking that field are left out and
    /// the rest sort by type (null, bool, number, text, array, object) first.
    fn list(
        &self,
        collection: &str,
        order_by: Option<FieldPath>,
    ) -> impl Future<Output = StoreResult<Vec<Document>>> + Send;

    /// Get documents matching a single field condition.
    fn query_where(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> impl Future<Output = StoreResult<Vec<Document>>> + Send;

    /// Get documents whose text field falls within a half-open range,
    /// ascending by that field.
    fn query_range(
        &self,
        collection: &str,
        field: &FieldPath,
        range: &TextRange,
    ) -> impl Future<Output = StoreResult<Vec<Document>>> + Send;

    /// Delete a document by id. Deleting a missing document is a no-op.
    fn delete(&self, collection: &str, id: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Merge `fields` into an existing document, top-level keys only.
    fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Storage backend lifecycle.
pub trait Database: Send + Sync + 'static {
    type Documents: DocumentStore + Clone + 'static;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = StoreResult<()>> + Send;

    /// Get a handle on the document store.
    fn documents(&self) -> Self::Documents;
}
