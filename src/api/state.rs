//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;
use crate::facade::Collection;
use crate::items::ItemController;

/// Shared application state.
///
/// Generic over `D: Database` so handlers never name a concrete backend.
/// The database is created once by the binary and injected here.
pub struct AppState<D: Database> {
    db: Arc<D>,
    items: ItemController<D::Documents>,
}

// Manual Clone impl - only the Arc and the store handle need cloning, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            items: self.items.clone(),
        }
    }
}

impl<D: Database> AppState<D> {
    pub fn new(db: D) -> Self {
        let items = ItemController::for_store(db.documents());
        Self {
            db: Arc::new(db),
            items,
        }
    }

    /// Controller behind the items page.
    pub fn items(&self) -> &ItemController<D::Documents> {
        &self.items
    }

    /// Facade over an arbitrary collection.
    pub fn collection(&self, name: &str) -> Collection<D::Documents> {
        Collection::new(self.db.documents(), name)
    }
}
