//! Domain models for the document store.
//!
//! These models are storage-agnostic: a document is an opaque id plus a JSON
//! object of fields, grouped into named collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::{StoreError, StoreResult};

/// Opaque document ID assigned by the store on creation.
pub type DocumentId = String;

/// Field values of a document.
pub type Fields = Map<String, Value>;

/// A stored document: its id paired with its field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

/// Point-in-time read of a single document by id.
///
/// A snapshot is returned even when no document carries the id; `exists()`
/// tells the two cases apart.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    id: DocumentId,
    fields: Option<Fields>,
}

impl DocumentSnapshot {
    pub fn found(document: Document) -> Self {
        Self {
            id: document.id,
            fields: Some(document.fields),
        }
    }

    pub fn missing(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            fields: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn exists(&self) -> bool {
        self.fields.is_some()
    }

    /// Field values, `None` when the document does not exist.
    pub fn data(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    pub fn into_document(self) -> Option<Document> {
        let id = self.id;
        self.fields.map(|fields| Document { id, fields })
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// A validated dotted path to a field, e.g. `title` or `author.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted field path.
    pub fn parse(path: &str) -> StoreResult<Self> {
        let invalid = |message: String| StoreError::InvalidData {
            message,
            help: "Use dot-separated field names such as 'title' or 'author.name'".to_string(),
        };

        if path.is_empty() {
            return Err(invalid("field path cannot be empty".to_string()));
        }

        let mut segments = Vec::new();
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(invalid(format!("field path '{}' has an empty segment", path)));
            }
            if let Some(c) = segment
                .chars()
                .find(|c| matches!(c, '"' | '$' | '[' | ']') || c.is_control())
            {
                return Err(invalid(format!(
                    "field path '{}' contains forbidden character {:?}",
                    path, c
                )));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// SQLite JSON path for this field, with every segment quoted.
    pub fn json_path(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.segments {
            path.push_str(".\"");
            path.push_str(segment);
            path.push('"');
        }
        path
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Comparison operator of a field filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    ArrayContains,
}

impl fmt::Display for WhereOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            WhereOp::Eq => "==",
            WhereOp::Ne => "!=",
            WhereOp::Lt => "<",
            WhereOp::Le => "<=",
            WhereOp::Gt => ">",
            WhereOp::Ge => ">=",
            WhereOp::In => "in",
            WhereOp::ArrayContains => "array-contains",
        };
        write!(f, "{}", op)
    }
}

impl FromStr for WhereOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(WhereOp::Eq),
            "!=" => Ok(WhereOp::Ne),
            "<" => Ok(WhereOp::Lt),
            "<=" => Ok(WhereOp::Le),
            ">" => Ok(WhereOp::Gt),
            ">=" => Ok(WhereOp::Ge),
            "in" => Ok(WhereOp::In),
            "array-contains" => Ok(WhereOp::ArrayContains),
            _ => Err(format!("Unknown comparison operator: {}", s)),
        }
    }
}

/// A single `field op value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: FieldPath,
    pub op: WhereOp,
    pub value: Value,
}

/// Half-open text range `[lower, upper)` over a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRange {
    pub lower_inclusive: String,
    pub upper_exclusive: String,
}
