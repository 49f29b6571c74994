//! Items page handlers.
//!
//! Every action answers 200 with the re-rendered page; outcomes are carried
//! by the alerts inside it.

use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use tracing::instrument;

use crate::api::AppState;
use crate::db::Database;
use crate::items::ItemForm;
use crate::ui::render_items_page;

#[instrument(skip(state))]
pub async fn index<D: Database>(State(state): State<AppState<D>>) -> Html<String> {
    Html(render_items_page(state.items().load_items().await))
}

/// Form submit: adds in create mode, updates the item under edit otherwise.
#[instrument(skip(state))]
pub async fn save_item<D: Database>(
    State(state): State<AppState<D>>,
    Form(form): Form<ItemForm>,
) -> Html<String> {
    Html(render_items_page(state.items().save(form).await))
}

#[instrument(skip(state))]
pub async fn edit_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Html<String> {
    Html(render_items_page(state.items().edit_item(&id).await))
}

#[instrument(skip(state))]
pub async fn delete_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Html<String> {
    Html(render_items_page(state.items().delete_item(&id).await))
}
