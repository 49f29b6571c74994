//! SQLite implementation of the store traits.
//!
//! Documents live in a single `document` table, one JSON object per row,
//! keyed by collection name and id. Field conditions are evaluated with
//! SQLite's JSON functions.

mod connection;
mod document;
mod helpers;

#[cfg(test)]
mod document_test;

pub use connection::SqliteDatabase;
pub use document::SqliteDocumentStore;
