//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for document storage,
//! allowing different backends (SQLite, in-memory, hosted services) to be
//! swapped without changing the facade built on top.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Documents, snapshots and query types
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLite implementation storing documents as JSON objects

mod error;
mod models;
mod repository;
mod sqlite;


pub use error::{StoreError, StoreResult};
pub use models::*;
pub use repository::*;
pub use sqlite::{SqliteDatabase, SqliteDocumentStore};
