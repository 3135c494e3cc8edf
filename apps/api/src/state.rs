//! Shared application state.

use pantry_core::CatalogOptions;
use pantry_db::Database;

use crate::lifecycle::LifecycleController;

/// Handed to every handler. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Catalog operations
    pub lifecycle: LifecycleController,

    /// Database handle, for health reporting
    pub db: Database,

    /// Option lists served to clients
    pub catalog: CatalogOptions,
}

impl AppState {
    /// Builds state over the SQLite repositories of `db`.
    pub fn new(db: Database, catalog: CatalogOptions) -> Self {
        let lifecycle = LifecycleController::from_database(&db, catalog.low_stock);
        AppState {
            lifecycle,
            db,
            catalog,
        }
    }
}
