//! Item controller: the four user actions on the items collection.
//!
//! Each action issues its facade call, then re-reads the list and reports
//! the outcome as an [`ItemView`]. Errors never escape an action: they are
//! logged and turned into a single generic notification.

use tracing::{info, instrument, warn};

use super::model::{Alert, FormMode, Item, ItemFields, ItemForm, ItemView};
use crate::db::DocumentStore;
use crate::facade::Collection;

/// Name of the collection backing the items page.
pub const ITEMS_COLLECTION: &str = "items";

pub const MSG_LOAD_FAILED: &str = "Error displaying the items";
pub const MSG_SAVED: &str = "Item saved successfully";
pub const MSG_SAVE_FAILED: &str = "Error while trying to save the item";
pub const MSG_DELETED: &str = "Item deleted successfully";
pub const MSG_DELETE_FAILED: &str = "Error while trying to delete the item";
pub const MSG_EDIT_FAILED: &str = "Error while trying to edit the item";
pub const MSG_UPDATED: &str = "Item updated successfully";
pub const MSG_UPDATE_FAILED: &str = "Error while trying to update the item";

/// Binds the items collection to the form and results table.
#[derive(Clone)]
pub struct ItemController<S> {
    items: Collection<S>,
}

impl<S: DocumentStore> ItemController<S> {
    pub fn new(items: Collection<S>) -> Self {
        Self { items }
    }

    /// Controller over the `items` collection of `store`.
    pub fn for_store(store: S) -> Self {
        Self::new(Collection::new(store, ITEMS_COLLECTION))
    }

    /// Fresh page in create mode listing every item.
    #[instrument(skip(self))]
    pub async fn load_items(&self) -> ItemView {
        let mut view = ItemView::default();
        self.reload(&mut view).await;
        view
    }

    /// Submit the form: creates an item in create mode, updates the item
    /// under edit otherwise.
    pub async fn save(&self, form: ItemForm) -> ItemView {
        match form.mode() {
            FormMode::Create => self.add_item(form.fields()).await,
            FormMode::Edit => {
                let fields = form.fields();
                self.update_item(&form.element_id, fields).await
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, fields: ItemFields) -> ItemView {
        let mut view = ItemView::default();
        match self.items.add(&fields.to_fields()).await {
            Ok(id) => {
                info!(%id, "item added");
                self.reload(&mut view).await;
                view.alerts.push(Alert::success(MSG_SAVED));
            }
            Err(e) => {
                warn!(error = %e, "add item failed");
                view.form = ItemForm::create(fields);
                self.reload(&mut view).await;
                view.alerts.push(Alert::danger(MSG_SAVE_FAILED));
            }
        }
        view
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> ItemView {
        let mut view = ItemView::default();
        match self.items.delete_by_id(id).await {
            Ok(()) => {
                info!(%id, "item deleted");
                self.reload(&mut view).await;
                view.alerts.push(Alert::success(MSG_DELETED));
            }
            Err(e) => {
                warn!(error = %e, "delete item failed");
                self.reload(&mut view).await;
                view.alerts.push(Alert::danger(MSG_DELETE_FAILED));
            }
        }
        view
    }

    /// Stage item `id` in the form for editing. Read-only.
    ///
    /// A missing item counts as a failure and leaves the form in create mode.
    #[instrument(skip(self))]
    pub async fn edit_item(&self, id: &str) -> ItemView {
        let mut view = ItemView::default();
        match self.items.select_by_id(id).await {
            Ok(snapshot) if snapshot.exists() => {
                let fields = snapshot.data().cloned().map(ItemFields::from).unwrap_or_default();
                view.form = ItemForm::edit(id, fields);
            }
            Ok(_) => {
                warn!(%id, "item to edit does not exist");
                view.alerts.push(Alert::danger(MSG_EDIT_FAILED));
            }
            Err(e) => {
                warn!(error = %e, "edit item failed");
                view.alerts.push(Alert::danger(MSG_EDIT_FAILED));
            }
        }
        self.reload(&mut view).await;
        view
    }

    #[instrument(skip(self))]
    pub async fn update_item(&self, id: &str, fields: ItemFields) -> ItemView {
        let mut view = ItemView::default();
        match self.items.update_by_id(id, &fields.to_fields()).await {
            Ok(()) => {
                info!(%id, "item updated");
                self.reload(&mut view).await;
                view.alerts.push(Alert::success(MSG_UPDATED));
            }
            Err(e) => {
                warn!(error = %e, "update item failed");
                view.form = ItemForm::edit(id, fields);
                self.reload(&mut view).await;
                view.alerts.push(Alert::danger(MSG_UPDATE_FAILED));
            }
        }
        view
    }

    /// Replace the rows with a fresh unordered read of the collection.
    async fn reload(&self, view: &mut ItemView) {
        match self.items.select_all(None).await {
            Ok(docs) => view.rows = docs.into_iter().map(Item::from).collect(),
            Err(e) => {
                warn!(error = %e, "loading items failed");
                view.rows.clear();
                view.alerts.push(Alert::danger(MSG_LOAD_FAILED));
            }
        }
    }
}
