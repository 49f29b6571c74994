//! SQLite DocumentStore implementation.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::helpers::{push_filter, push_type_rank, row_to_document, select_documents};
use crate::db::{
    Document, DocumentId, DocumentStore, FieldPath, Fields, Filter, StoreError, StoreResult,
    TextRange,
};

/// SQLx-backed document store.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pub(crate) pool: SqlitePool,
}

/// Generate a new opaque document ID.
fn generate_document_id() -> DocumentId {
    Uuid::new_v4().simple().to_string()
}

fn serialize_fields(fields: &Fields) -> StoreResult<String> {
    serde_json::to_string(fields).map_err(|e| StoreError::Database {
        message: format!("Failed to serialize document fields: {}", e),
    })
}

impl DocumentStore for SqliteDocumentStore {
    async fn insert(&self, collection: &str, fields: &Fields) -> StoreResult<DocumentId> {
        let id = generate_document_id();
        let fields_json = serialize_fields(fields)?;

        sqlx::query("INSERT INTO document (collection, id, fields) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(&id)
            .bind(fields_json)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query("SELECT id, fields FROM document WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_document).transpose()
    }

    async fn list(
        &self,
        collection: &str,
        order_by: Option<FieldPath>,
    ) -> StoreResult<Vec<Document>> {
        let mut qb = select_documents(collection);
        match order_by {
            // Type class first (null, bool, number, text, array, object), then value.
            Some(field) => {
                let path = field.json_path();
                qb.push(" AND json_type(fields, ");
                qb.push_bind(path.clone());
                qb.push(") IS NOT NULL ORDER BY ");
                push_type_rank(&mut qb, &path);
                qb.push(" ASC, json_extract(fields, ");
                qb.push_bind(path);
                qb.push(") ASC, seq ASC");
            }
            None => {
                qb.push(" ORDER BY seq ASC");
            }
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_document).collect()
    }

    async fn query_where(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>> {
        let mut qb = select_documents(collection);
        push_filter(&mut qb, filter)?;
        qb.push(" ORDER BY seq ASC");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_document).collect()
    }

    async fn query_range(
        &self,
        collection: &str,
        field: &FieldPath,
        range: &TextRange,
    ) -> StoreResult<Vec<Document>> {
        let path = field.json_path();
        let mut qb = select_documents(collection);
        qb.push(" AND json_type(fields, ");
        qb.push_bind(path.clone());
        qb.push(") = 'text' AND json_extract(fields, ");
        qb.push_bind(path.clone());
        qb.push(") >= ");
        qb.push_bind(range.lower_inclusive.clone());
        qb.push(" AND json_extract(fields, ");
        qb.push_bind(path.clone());
        qb.push(") < ");
        qb.push_bind(range.upper_exclusive.clone());
        qb.push(" ORDER BY json_extract(fields, ");
        qb.push_bind(path);
        qb.push(") ASC, seq ASC");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_document).collect()
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM document WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: &Fields) -> StoreResult<()> {
        // Take the write lock up front so concurrent merges queue on the busy
        // timeout instead of failing on lock upgrade.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let row = sqlx::query("SELECT fields FROM document WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        };

        let current_json: String = row.get("fields");
        let mut current: Fields =
            serde_json::from_str(&current_json).map_err(|e| StoreError::Database {
                message: format!("Failed to parse document fields: {}", e),
            })?;
        for (key, value) in fields {
            current.insert(key.clone(), value.clone());
        }

        sqlx::query("UPDATE document SET fields = ? WHERE collection = ? AND id = ?")
            .bind(serialize_fields(&current)?)
            .bind(collection)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
