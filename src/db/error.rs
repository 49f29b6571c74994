//! Store error types.
//!
//! This module provides the errors raised by a document store backend.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Document store errors.
#[derive(Error, Diagnostic, Debug)]
pub enum StoreError {
    #[error("Document not found: {collection} with id '{id}'")]
    #[diagnostic(code(itemdesk::db::not_found))]
    NotFound { collection: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(itemdesk::db::invalid_data))]
    InvalidData {
        message: String,
        #[help]
        help: String,
    },

    #[error("Invalid query: {message}")]
    #[diagnostic(code(itemdesk::db::invalid_query))]
    InvalidQuery { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(itemdesk::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(itemdesk::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(itemdesk::db::connection_error))]
    Connection { message: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database {
            message: e.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
