//! Document collection handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::db::{Database, Document, Fields, WhereOp};
use crate::facade::FacadeError;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct DocumentResponse {
    #[schema(example = "3f2a9c1e5b7d4a6f8e0c2b4d6f8a0c2e")]
    pub id: String,
    #[schema(value_type = Object, example = json!({"title": "Hello", "content": "World"}))]
    pub fields: Fields,
}

impl From<Document> for DocumentResponse {
    fn from(d: Document) -> Self {
        Self {
            id: d.id,
            fields: d.fields,
        }
    }
}

/// Top-level fields of a document.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(value_type = Object)]
pub struct FieldsBody(pub Fields);

#[derive(Serialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "3f2a9c1e5b7d4a6f8e0c2b4d6f8a0c2e")]
    pub id: String,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Document 'abc' not found in 'items'")]
    pub error: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListDocumentsQuery {
    /// Field path to sort ascending by; documents lacking it are left out
    #[param(example = "title")]
    pub order_by: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct WhereQuery {
    /// Field path to compare
    #[param(example = "title")]
    pub field: String,
    /// One of ==, !=, <, <=, >, >=, in, array-contains
    #[param(example = "==")]
    pub op: String,
    /// Comparison value, read as JSON when it parses and as a string otherwise
    #[param(example = "\"Hello\"")]
    pub value: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PrefixQuery {
    /// Text field path to match
    #[param(example = "title")]
    pub field: String,
    /// Required prefix; empty matches every text value
    #[param(example = "He")]
    pub prefix: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

fn error_response(status: StatusCode, error: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error }))
}

fn facade_error(e: FacadeError) -> (StatusCode, Json<ErrorResponse>) {
    let status = if e.is_invalid_request() {
        StatusCode::BAD_REQUEST
    } else if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    error_response(status, e.to_string())
}

fn into_responses(docs: Vec<Document>) -> Json<Vec<DocumentResponse>> {
    Json(docs.into_iter().map(DocumentResponse::from).collect())
}

/// Query-string values are JSON when they parse (`5`, `true`, `["a","b"]`),
/// bare text otherwise.
fn parse_query_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/collections/{collection}/documents",
    tag = "documents",
    params(
        ("collection" = String, Path, description = "Collection name"),
        ListDocumentsQuery
    ),
    responses(
        (status = 200, description = "Documents in the collection", body = Vec<DocumentResponse>),
        (status = 400, description = "Invalid field path", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_documents<D: Database>(
    State(state): State<AppState<D>>,
    Path(collection): Path<String>,
    Query(query): Query<ListDocumentsQuery>,
) -> ApiResult<Json<Vec<DocumentResponse>>> {
    let docs = state
        .collection(&collection)
        .select_all(query.order_by.as_deref())
        .await
        .map_err(facade_error)?;

    Ok(into_responses(docs))
}

#[utoipa::path(
    post,
    path = "/api/v1/collections/{collection}/documents",
    tag = "documents",
    params(("collection" = String, Path, description = "Collection name")),
    request_body = FieldsBody,
    responses(
        (status = 201, description = "Document created", body = CreatedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_document<D: Database>(
    State(state): State<AppState<D>>,
    Path(collection): Path<String>,
    Json(body): Json<FieldsBody>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state
        .collection(&collection)
        .add(&body.0)
        .await
        .map_err(facade_error)?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(
    get,
    path = "/api/v1/collections/{collection}/documents/{id}",
    tag = "documents",
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document found", body = DocumentResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_document<D: Database>(
    State(state): State<AppState<D>>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Json<DocumentResponse>> {
    let snapshot = state
        .collection(&collection)
        .select_by_id(&id)
        .await
        .map_err(facade_error)?;

    snapshot
        .into_document()
        .map(|d| Json(DocumentResponse::from(d)))
        .ok_or_else(|| {
            error_response(
                StatusCode::NOT_FOUND,
                format!("Document '{}' not found in '{}'", id, collection),
            )
        })
}

#[utoipa::path(
    patch,
    path = "/api/v1/collections/{collection}/documents/{id}",
    tag = "documents",
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Document ID")
    ),
    request_body = FieldsBody,
    responses(
        (status = 204, description = "Fields merged into the document"),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn patch_document<D: Database>(
    State(state): State<AppState<D>>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<FieldsBody>,
) -> ApiResult<StatusCode> {
    state
        .collection(&collection)
        .update_by_id(&id, &body.0)
        .await
        .map_err(facade_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/collections/{collection}/documents/{id}",
    tag = "documents",
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Document ID")
    ),
    responses(
        (status = 204, description = "Document deleted or already absent"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_document<D: Database>(
    State(state): State<AppState<D>>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state
        .collection(&collection)
        .delete_by_id(&id)
        .await
        .map_err(facade_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/collections/{collection}/query",
    tag = "documents",
    params(
        ("collection" = String, Path, description = "Collection name"),
        WhereQuery
    ),
    responses(
        (status = 200, description = "Matching documents", body = Vec<DocumentResponse>),
        (status = 400, description = "Invalid field, operator or value", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn query_documents<D: Database>(
    State(state): State<AppState<D>>,
    Path(collection): Path<String>,
    Query(query): Query<WhereQuery>,
) -> ApiResult<Json<Vec<DocumentResponse>>> {
    let op: WhereOp = query
        .op
        .parse()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;

    let docs = state
        .collection(&collection)
        .select_where(&query.field, op, parse_query_value(&query.value))
        .await
        .map_err(facade_error)?;

    Ok(into_responses(docs))
}

#[utoipa::path(
    get,
    path = "/api/v1/collections/{collection}/prefix",
    tag = "documents",
    params(
        ("collection" = String, Path, description = "Collection name"),
        PrefixQuery
    ),
    responses(
        (status = 200, description = "Documents whose field starts with the prefix", body = Vec<DocumentResponse>),
        (status = 400, description = "Invalid field path", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn prefix_documents<D: Database>(
    State(state): State<AppState<D>>,
    Path(collection): Path<String>,
    Query(query): Query<PrefixQuery>,
) -> ApiResult<Json<Vec<DocumentResponse>>> {
    let docs = state
        .collection(&collection)
        .select_like(&query.field, &query.prefix)
        .await
        .map_err(facade_error)?;

    Ok(into_responses(docs))
}
