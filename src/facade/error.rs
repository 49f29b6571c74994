//! Facade error types.
//!
//! Every variant names the failed operation and its identifiers, and wraps
//! the store error that caused it.

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

use crate::db::StoreError;

/// Data-access facade errors.
#[derive(Error, Diagnostic, Debug)]
pub enum FacadeError {
    #[error("Failed to add document to '{collection}': {source}")]
    #[diagnostic(code(itemdesk::facade::add))]
    Add {
        collection: String,
        source: StoreError,
    },

    #[error("Failed to delete document with ID {id}: {source}")]
    #[diagnostic(code(itemdesk::facade::delete_by_id))]
    DeleteById { id: String, source: StoreError },

    #[error("Failed to retrieve all documents from '{collection}': {source}")]
    #[diagnostic(code(itemdesk::facade::select_all))]
    SelectAll {
        collection: String,
        source: StoreError,
    },

    #[error("Failed to retrieve document with ID {id}: {source}")]
    #[diagnostic(code(itemdesk::facade::select_by_id))]
    SelectById { id: String, source: StoreError },

    #[error("Failed to retrieve documents where {field} {op} {value}: {source}")]
    #[diagnostic(code(itemdesk::facade::select_where))]
    SelectWhere {
        field: String,
        op: String,
        value: Value,
        source: StoreError,
    },

    #[error("Failed to retrieve documents like {prefix}: {source}")]
    #[diagnostic(code(itemdesk::facade::select_like))]
    SelectLike {
        field: String,
        prefix: String,
        source: StoreError,
    },

    #[error("Failed to update document with ID {id}: {source}")]
    #[diagnostic(code(itemdesk::facade::update_by_id))]
    UpdateById { id: String, source: StoreError },
}

impl FacadeError {
    /// The underlying store error.
    pub fn store_error(&self) -> &StoreError {
        match self {
            FacadeError::Add { source, .. }
            | FacadeError::DeleteById { source, .. }
            | FacadeError::SelectAll { source, .. }
            | FacadeError::SelectById { source, .. }
            | FacadeError::SelectWhere { source, .. }
            | FacadeError::SelectLike { source, .. }
            | FacadeError::UpdateById { source, .. } => source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.store_error(), StoreError::NotFound { .. })
    }

    /// Whether the caller supplied an unusable field path or query.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self.store_error(),
            StoreError::InvalidData { .. } | StoreError::InvalidQuery { .. }
        )
    }
}

/// Result type for facade operations.
pub type FacadeResult<T> = Result<T, FacadeError>;
