//! Shared helpers for building document queries.

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::db::{Document, Fields, Filter, StoreError, StoreResult, WhereOp};

/// Maximum number of values accepted by an `in` filter.
pub const MAX_IN_VALUES: usize = 30;

/// Start a `SELECT` over one collection; callers append further conditions.
pub fn select_documents<'args>(collection: &str) -> QueryBuilder<'args, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT id, fields FROM document WHERE collection = ");
    qb.push_bind(collection.to_string());
    qb
}

/// Decode a `(id, fields)` row into a document.
pub fn row_to_document(row: SqliteRow) -> StoreResult<Document> {
    let fields_json: String = row.get("fields");
    let fields: Fields = serde_json::from_str(&fields_json).map_err(|e| StoreError::Database {
        message: format!("Failed to parse document fields: {}", e),
    })?;

    Ok(Document {
        id: row.get("id"),
        fields,
    })
}

/// What a comparison is applied to.
#[derive(Clone, Copy)]
enum Target<'a> {
    /// A field of the document row, by JSON path.
    Field(&'a str),
    /// The current element of a `json_each` scan aliased `e`.
    Element,
}

/// `json_type` names of stored values that compare with `value`.
///
/// Values of different JSON types never match each other.
fn type_class(value: &Value) -> &'static str {
    match value {
        Value::Null => "('null')",
        Value::Bool(_) => "('true', 'false')",
        Value::Number(_) => "('integer', 'real')",
        Value::String(_) => "('text')",
        Value::Array(_) => "('array')",
        Value::Object(_) => "('object')",
    }
}

/// Rank of a field's JSON type for ordering: null, booleans, numbers, text,
/// arrays, objects.
pub fn push_type_rank(qb: &mut QueryBuilder<'_, Sqlite>, path: &str) {
    qb.push("CASE json_type(fields, ");
    qb.push_bind(path.to_string());
    qb.push(
        ") WHEN 'null' THEN 0 WHEN 'false' THEN 1 WHEN 'true' THEN 1 \
         WHEN 'integer' THEN 2 WHEN 'real' THEN 2 WHEN 'text' THEN 3 \
         WHEN 'array' THEN 4 ELSE 5 END",
    );
}

fn push_type_of(qb: &mut QueryBuilder<'_, Sqlite>, target: Target<'_>) {
    match target {
        Target::Field(path) => {
            qb.push("json_type(fields, ");
            qb.push_bind(path.to_string());
            qb.push(")");
        }
        Target::Element => {
            qb.push("e.type");
        }
    }
}

fn push_value_of(qb: &mut QueryBuilder<'_, Sqlite>, target: Target<'_>) {
    match target {
        Target::Field(path) => {
            qb.push("json_extract(fields, ");
            qb.push_bind(path.to_string());
            qb.push(")");
        }
        Target::Element => {
            qb.push("e.value");
        }
    }
}

/// Bind a JSON value the way `json_extract` reports it back.
fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: &Value) {
    match value {
        Value::Null => {
            qb.push("NULL");
        }
        Value::Bool(b) => {
            qb.push_bind(i64::from(*b));
        }
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => {
                qb.push_bind(i);
            }
            (None, Some(f)) => {
                qb.push_bind(f);
            }
            (None, None) => {
                qb.push("NULL");
            }
        },
        Value::String(s) => {
            qb.push_bind(s.clone());
        }
        Value::Array(_) | Value::Object(_) => {
            qb.push_bind(value.to_string());
        }
    }
}

/// `target` holds a value of the same type equal to `value`.
fn push_equals(qb: &mut QueryBuilder<'_, Sqlite>, target: Target<'_>, value: &Value) {
    push_type_of(qb, target);
    if value.is_null() {
        qb.push(" = 'null'");
        return;
    }
    qb.push(" IN ");
    qb.push(type_class(value));
    qb.push(" AND ");
    push_value_of(qb, target);
    qb.push(" = ");
    push_value(qb, value);
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn invalid_query(message: String) -> StoreError {
    StoreError::InvalidQuery { message }
}

/// Append ` AND <condition>` for a single field filter.
pub fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) -> StoreResult<()> {
    let path = filter.field.json_path();
    let field = Target::Field(&path);
    let value = &filter.value;

    qb.push(" AND (");
    match filter.op {
        WhereOp::Eq => push_equals(qb, field, value),
        WhereOp::Ne => {
            // Missing fields and nulls never satisfy `!=`.
            push_type_of(qb, field);
            qb.push(" <> 'null'");
            if !value.is_null() {
                qb.push(" AND NOT (");
                push_equals(qb, field, value);
                qb.push(")");
            }
        }
        op @ (WhereOp::Lt | WhereOp::Le | WhereOp::Gt | WhereOp::Ge) => {
            if !matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_)) {
                return Err(invalid_query(format!(
                    "'{}' needs a string, number or boolean value, got {}",
                    op, value
                )));
            }
            push_type_of(qb, field);
            qb.push(" IN ");
            qb.push(type_class(value));
            qb.push(" AND ");
            push_value_of(qb, field);
            // Display of ordering operators is valid SQL.
            qb.push(format!(" {} ", op));
            push_value(qb, value);
        }
        WhereOp::In => {
            let Value::Array(candidates) = value else {
                return Err(invalid_query(format!("'in' expects an array, got {}", value)));
            };
            if candidates.len() > MAX_IN_VALUES {
                return Err(invalid_query(format!(
                    "'in' accepts at most {} values, got {}",
                    MAX_IN_VALUES,
                    candidates.len()
                )));
            }
            if !candidates.iter().all(is_scalar) {
                return Err(invalid_query(
                    "'in' values must be strings, numbers, booleans or null".to_string(),
                ));
            }
            if candidates.is_empty() {
                qb.push("0");
            } else {
                for (i, candidate) in candidates.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push("(");
                    push_equals(qb, field, candidate);
                    qb.push(")");
                }
            }
        }
        WhereOp::ArrayContains => {
            if !is_scalar(value) {
                return Err(invalid_query(format!(
                    "'array-contains' expects a single value, got {}",
                    value
                )));
            }
            push_type_of(qb, field);
            qb.push(" = 'array' AND EXISTS (SELECT 1 FROM json_each(document.fields, ");
            qb.push_bind(path.clone());
            qb.push(") AS e WHERE ");
            push_equals(qb, Target::Element, value);
            qb.push(")");
        }
    }
    qb.push(")");

    Ok(())
}
