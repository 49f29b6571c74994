//! Route configuration.

use axum::Router;
use axum::routing::{delete, get, patch, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse};
use super::pages;
use super::state::AppState;
use super::v1::{self, CreatedResponse, DocumentResponse, ErrorResponse, FieldsBody};
use crate::db::Database;

/// Build routes with generic database type.
///
/// Applies the turbofish to handlers that are generic over the Database trait.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "itemdesk API",
        version = "0.1.0",
        description = "Document collection API behind the items page",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        v1::list_documents,
        v1::create_document,
        v1::get_document,
        v1::patch_document,
        v1::delete_document,
        v1::query_documents,
        v1::prefix_documents,
    ),
    components(
        schemas(
            HealthResponse,
            DocumentResponse,
            FieldsBody,
            CreatedResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health endpoints"),
        (name = "documents", description = "Document collection endpoints")
    )
)]
pub struct ApiDoc;

/// Create the router: items page, JSON API and OpenAPI docs.
pub fn create_router<D: Database>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/health", get(handlers::health));

    let page_routes = routes!(D => {
        get "/" => pages::index,
        post "/items" => pages::save_item,
        get "/items/{id}/edit" => pages::edit_item,
        post "/items/{id}/delete" => pages::delete_item,
    });

    let document_routes = routes!(D => {
        get "/api/v1/collections/{collection}/documents" => v1::list_documents,
        post "/api/v1/collections/{collection}/documents" => v1::create_document,
        get "/api/v1/collections/{collection}/documents/{id}" => v1::get_document,
        patch "/api/v1/collections/{collection}/documents/{id}" => v1::patch_document,
        delete "/api/v1/collections/{collection}/documents/{id}" => v1::delete_document,
        get "/api/v1/collections/{collection}/query" => v1::query_documents,
        get "/api/v1/collections/{collection}/prefix" => v1::prefix_documents,
    });

    system_routes
        .merge(page_routes)
        .merge(document_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
