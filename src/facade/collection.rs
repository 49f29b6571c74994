//! Collection handle exposing the CRUD facade.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{FacadeError, FacadeResult};
use crate::db::{
    Document, DocumentId, DocumentSnapshot, DocumentStore, FieldPath, Fields, Filter, TextRange,
    WhereOp,
};

/// Code point appended to a prefix to form the exclusive upper bound of a
/// prefix scan. It is the greatest code point, so it sorts after any
/// character that can follow the prefix.
pub const PREFIX_SENTINEL: char = char::MAX;

/// Exclusive range `[prefix, prefix + sentinel)` covering every string that
/// starts with `prefix`.
pub fn prefix_range(prefix: &str) -> TextRange {
    let mut upper = String::with_capacity(prefix.len() + PREFIX_SENTINEL.len_utf8());
    upper.push_str(prefix);
    upper.push(PREFIX_SENTINEL);
    TextRange {
        lower_inclusive: prefix.to_string(),
        upper_exclusive: upper,
    }
}

/// Handle on one named collection of a document store.
///
/// Holds no state besides the store handle and the name; every operation is
/// a single round trip and failures come back as [`FacadeError`].
#[derive(Clone)]
pub struct Collection<S> {
    store: S,
    name: String,
}

impl<S: DocumentStore> Collection<S> {
    pub fn new(store: S, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    /// Add a new document, returning its id. Every call creates a new document.
    #[instrument(skip(self, fields), fields(collection = %self.name))]
    pub async fn add(&self, fields: &Fields) -> FacadeResult<DocumentId> {
        let id = self
            .store
            .insert(&self.name, fields)
            .await
            .map_err(|source| FacadeError::Add {
                collection: self.name.clone(),
                source,
            })
            .inspect_err(|e| warn!(error = %e, "add failed"))?;

        debug!(%id, "document added");
        Ok(id)
    }

    /// Delete a document by id. Deleting a missing document succeeds.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn delete_by_id(&self, id: &str) -> FacadeResult<()> {
        self.store
            .delete(&self.name, id)
            .await
            .map_err(|source| FacadeError::DeleteById {
                id: id.to_string(),
                source,
            })
            .inspect_err(|e| warn!(error = %e, "delete failed"))
    }

    /// All documents, ascending by `order_by` when given, else in store order.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn select_all(&self, order_by: Option<&str>) -> FacadeResult<Vec<Document>> {
        let to_error = |source| FacadeError::SelectAll {
            collection: self.name.clone(),
            source,
        };

        let order_by = order_by.map(FieldPath::parse).transpose().map_err(to_error)?;
        self.store
            .list(&self.name, order_by)
            .await
            .map_err(to_error)
            .inspect_err(|e| warn!(error = %e, "select all failed"))
    }

    /// Read one document. A missing document yields a snapshot that does not
    /// exist rather than an error.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn select_by_id(&self, id: &str) -> FacadeResult<DocumentSnapshot> {
        let document = self
            .store
            .get(&self.name, id)
            .await
            .map_err(|source| FacadeError::SelectById {
                id: id.to_string(),
                source,
            })
            .inspect_err(|e| warn!(error = %e, "select by id failed"))?;

        Ok(match document {
            Some(document) => DocumentSnapshot::found(document),
            None => DocumentSnapshot::missing(id),
        })
    }

    /// Documents whose `field` compares to `value` under `op`.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn select_where(
        &self,
        field: &str,
        op: WhereOp,
        value: Value,
    ) -> FacadeResult<Vec<Document>> {
        let to_error = |source| FacadeError::SelectWhere {
            field: field.to_string(),
            op: op.to_string(),
            value: value.clone(),
            source,
        };

        let filter = Filter {
            field: FieldPath::parse(field).map_err(to_error)?,
            op,
            value: value.clone(),
        };
        self.store
            .query_where(&self.name, &filter)
            .await
            .map_err(to_error)
            .inspect_err(|e| warn!(error = %e, "select where failed"))
    }

    /// Documents whose text `field` starts with `prefix`, ascending by that
    /// field. Emulated as a range scan over [`prefix_range`].
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn select_like(&self, field: &str, prefix: &str) -> FacadeResult<Vec<Document>> {
        let to_error = |source| FacadeError::SelectLike {
            field: field.to_string(),
            prefix: prefix.to_string(),
            source,
        };

        let path = FieldPath::parse(field).map_err(to_error)?;
        self.store
            .query_range(&self.name, &path, &prefix_range(prefix))
            .await
            .map_err(to_error)
            .inspect_err(|e| warn!(error = %e, "select like failed"))
    }

    /// Overwrite the given top-level fields of an existing document; other
    /// fields keep their values. Fails with a not-found cause when the
    /// document does not exist.
    #[instrument(skip(self, fields), fields(collection = %self.name))]
    pub async fn update_by_id(&self, id: &str, fields: &Fields) -> FacadeResult<()> {
        self.store
            .update(&self.name, id, fields)
            .await
            .map_err(|source| FacadeError::UpdateById {
                id: id.to_string(),
                source,
            })
            .inspect_err(|e| warn!(error = %e, "update failed"))
    }
}
