//! Shared test helpers.

use std::future::ready;

use serde_json::Value;

use crate::db::{
    Database, DocumentStore, Fields, MockDocumentStore, SqliteDatabase, SqliteDocumentStore,
    StoreError, StoreResult,
};

/// Fresh migrated in-memory store.
pub async fn memory_store() -> SqliteDocumentStore {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db.documents()
}

pub fn fields(value: Value) -> Fields {
    value.as_object().cloned().expect("fields must be an object")
}

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Connection {
        message: "store unavailable".to_string(),
    })
}

/// Mock whose writes all fail with a connection error.
fn failing_writes() -> MockDocumentStore {
    let mut mock = MockDocumentStore::new();
    mock.expect_insert()
        .returning(|_, _| Box::pin(ready(unavailable())));
    mock.expect_delete()
        .returning(|_, _| Box::pin(ready(unavailable())));
    mock.expect_update()
        .returning(|_, _, _| Box::pin(ready(unavailable())));
    mock
}

/// Store whose every call fails, standing in for an unreachable backend.
pub fn unavailable_store() -> MockDocumentStore {
    let mut mock = failing_writes();
    mock.expect_get()
        .returning(|_, _| Box::pin(ready(unavailable())));
    mock.expect_list()
        .returning(|_, _| Box::pin(ready(unavailable())));
    mock.expect_query_where()
        .returning(|_, _| Box::pin(ready(unavailable())));
    mock.expect_query_range()
        .returning(|_, _, _| Box::pin(ready(unavailable())));
    mock
}

/// Store that answers reads from `store` but rejects every write, so a page
/// can still list rows after a failed mutation.
pub fn read_only_store(store: SqliteDocumentStore) -> MockDocumentStore {
    let mut mock = failing_writes();

    let inner = store.clone();
    mock.expect_get().returning(move |collection, id| {
        let (inner, collection, id) = (inner.clone(), collection.to_string(), id.to_string());
        Box::pin(async move { inner.get(&collection, &id).await })
    });

    let inner = store.clone();
    mock.expect_list().returning(move |collection, order_by| {
        let (inner, collection) = (inner.clone(), collection.to_string());
        Box::pin(async move { inner.list(&collection, order_by).await })
    });

    let inner = store.clone();
    mock.expect_query_where().returning(move |collection, filter| {
        let (inner, collection, filter) = (inner.clone(), collection.to_string(), filter.clone());
        Box::pin(async move { inner.query_where(&collection, &filter).await })
    });

    mock.expect_query_range().returning(move |collection, field, range| {
        let (inner, collection) = (store.clone(), collection.to_string());
        let (field, range) = (field.clone(), range.clone());
        Box::pin(async move { inner.query_range(&collection, &field, &range).await })
    });

    mock
}
