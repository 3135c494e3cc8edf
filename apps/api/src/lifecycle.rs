//! # Lifecycle Controller
//!
//! Orchestrates every write and read against the two catalogs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  handler ──► LifecycleController ──► validation (pantry-core)          │
//! │                     │                                                   │
//! │                     ├── assigns ids and timestamps                      │
//! │                     ▼                                                   │
//! │              GroceryStore / InventoryStore (pantry-db)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Update semantics
//! - Groceries merge: fields absent from the patch keep their stored value.
//! - Inventory replaces: every required field must be sent on each update.
//!
//! ## Bulk purchase
//! `purchase_all_pending` snapshots the pending ids first and writes exactly
//! that id list. Items added after the snapshot stay pending. The write is
//! idempotent, so retrying with the same ids is harmless.

use std::sync::Arc;

use chrono::Utc;
use pantry_core::validation::{validate_grocery, validate_grocery_update, validate_inventory};
use pantry_core::views::{grocery_overview, inventory_overview};
use pantry_core::{
    CoreError, FieldErrors, GroceryCandidate, GroceryFlags, GroceryItem, GroceryOverview,
    GroceryPatch, InventoryCandidate, InventoryItem, InventoryOverview, ItemFilter,
    LowStockPolicy, SortOrder,
};
use pantry_db::{
    Database, DbError, GroceryQuery, GroceryStore, InventoryStore, RecordOrder,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

const GROCERY_ENTITY: &str = "Grocery item";
const INVENTORY_ENTITY: &str = "Inventory item";

// =============================================================================
// Errors
// =============================================================================

/// Why a lifecycle operation did not complete.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Expected outcome: validation, missing record, nothing to purchase.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The store failed.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] DbError),
}

impl From<FieldErrors> for LifecycleError {
    fn from(errors: FieldErrors) -> Self {
        LifecycleError::Domain(CoreError::Validation(errors))
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Result of a bulk purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    /// Items whose flags actually changed.
    pub modified_count: u64,
    /// Items in the pending snapshot.
    pub considered_count: usize,
}

// =============================================================================
// Controller
// =============================================================================

/// Entry point for catalog operations. Cheap to clone.
#[derive(Clone)]
pub struct LifecycleController {
    groceries: Arc<dyn GroceryStore>,
    inventory: Arc<dyn InventoryStore>,
    policy: LowStockPolicy,
}

impl LifecycleController {
    pub fn new(
        groceries: Arc<dyn GroceryStore>,
        inventory: Arc<dyn InventoryStore>,
        policy: LowStockPolicy,
    ) -> Self {
        LifecycleController {
            groceries,
            inventory,
            policy,
        }
    }

    /// Builds a controller over the SQLite repositories of `db`.
    pub fn from_database(db: &Database, policy: LowStockPolicy) -> Self {
        Self::new(Arc::new(db.groceries()), Arc::new(db.inventory()), policy)
    }

    pub fn policy(&self) -> &LowStockPolicy {
        &self.policy
    }

    // -------------------------------------------------------------------------
    // Groceries
    // -------------------------------------------------------------------------

    /// The shopping list: everything not archived, newest first.
    pub async fn list_groceries(&self) -> LifecycleResult<Vec<GroceryItem>> {
        Ok(self
            .groceries
            .find(GroceryQuery::ACTIVE, RecordOrder::NewestFirst)
            .await?)
    }

    pub async fn list_archived_groceries(&self) -> LifecycleResult<Vec<GroceryItem>> {
        Ok(self
            .groceries
            .find(GroceryQuery::ARCHIVED, RecordOrder::NewestFirst)
            .await?)
    }

    /// Validates and stores a new grocery item.
    ///
    /// The item starts pending and `date_added` is stamped here.
    pub async fn create_grocery(&self, candidate: &GroceryCandidate) -> LifecycleResult<GroceryItem> {
        let valid = validate_grocery(candidate)?;

        let item = GroceryItem {
            id: Uuid::new_v4().to_string(),
            name: valid.name,
            quantity: valid.quantity,
            category: valid.category,
            completed: false,
            archived: false,
            date_added: Utc::now(),
            version: 0,
        };

        let stored = self.groceries.insert(&item).await?;
        info!(id = %stored.id, name = %stored.name, "Grocery item created");
        Ok(stored)
    }

    /// Merges `patch` into the stored item and validates the result.
    pub async fn update_grocery(&self, id: &str, patch: &GroceryPatch) -> LifecycleResult<GroceryItem> {
        debug!(id = %id, "Updating grocery item");

        let current = self
            .groceries
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(GROCERY_ENTITY, id))?;

        let changes = validate_grocery_update(&current, patch)?;

        // The row can vanish between read and write.
        let updated = self
            .groceries
            .update_one(id, &changes)
            .await?
            .ok_or_else(|| CoreError::not_found(GROCERY_ENTITY, id))?;

        Ok(updated)
    }

    pub async fn delete_grocery(&self, id: &str) -> LifecycleResult<()> {
        if !self.groceries.delete_one(id).await? {
            return Err(CoreError::not_found(GROCERY_ENTITY, id).into());
        }
        info!(id = %id, "Grocery item deleted");
        Ok(())
    }

    /// Marks every currently pending item purchased and archived.
    ///
    /// ## Errors
    /// `CoreError::NoPendingItems` when the snapshot is empty. Nothing is
    /// written in that case.
    pub async fn purchase_all_pending(&self) -> LifecycleResult<PurchaseOutcome> {
        let pending = self
            .groceries
            .find(GroceryQuery::PENDING, RecordOrder::OldestFirst)
            .await?;

        if pending.is_empty() {
            return Err(CoreError::NoPendingItems.into());
        }

        let ids: Vec<String> = pending.into_iter().map(|item| item.id).collect();
        let modified_count = self
            .groceries
            .update_many(&ids, GroceryFlags::PURCHASED)
            .await?;

        if modified_count < ids.len() as u64 {
            warn!(
                considered = ids.len(),
                modified = modified_count,
                "Some pending items changed before the purchase was written"
            );
        }
        info!(count = modified_count, "Pending groceries purchased and archived");

        Ok(PurchaseOutcome {
            modified_count,
            considered_count: ids.len(),
        })
    }

    /// The shopping list filtered and summarized.
    pub async fn grocery_view(&self, filter: &ItemFilter) -> LifecycleResult<GroceryOverview> {
        let items = self.list_groceries().await?;
        Ok(grocery_overview(&items, filter, &self.policy))
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// All inventory, newest first.
    pub async fn list_inventory(&self) -> LifecycleResult<Vec<InventoryItem>> {
        Ok(self.inventory.find(RecordOrder::NewestFirst).await?)
    }

    pub async fn create_inventory(
        &self,
        candidate: &InventoryCandidate,
    ) -> LifecycleResult<InventoryItem> {
        let now = Utc::now();
        let valid = validate_inventory(candidate, now)?;

        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: valid.name,
            category: valid.category,
            quantity: valid.quantity,
            manufacture_date: valid.manufacture_date,
            expire_date: valid.expire_date,
            temperature: valid.temperature,
            status: valid.status,
            created_at: now,
            updated_at: now,
            version: 0,
        };

        let stored = self.inventory.insert(&item).await?;
        info!(id = %stored.id, name = %stored.name, "Inventory item created");
        Ok(stored)
    }

    /// Replaces an inventory item. Every required field must be present.
    pub async fn update_inventory(
        &self,
        id: &str,
        candidate: &InventoryCandidate,
    ) -> LifecycleResult<InventoryItem> {
        debug!(id = %id, "Replacing inventory item");

        let now = Utc::now();
        let valid = validate_inventory(candidate, now)?;

        let updated = self
            .inventory
            .update_one(id, &valid, now)
            .await?
            .ok_or_else(|| CoreError::not_found(INVENTORY_ENTITY, id))?;

        Ok(updated)
    }

    pub async fn delete_inventory(&self, id: &str) -> LifecycleResult<()> {
        if !self.inventory.delete_one(id).await? {
            return Err(CoreError::not_found(INVENTORY_ENTITY, id).into());
        }
        info!(id = %id, "Inventory item deleted");
        Ok(())
    }

    /// Inventory matching `search_term`, sorted by manufacture date.
    pub async fn inventory_view(
        &self,
        search_term: &str,
        order: SortOrder,
    ) -> LifecycleResult<InventoryOverview> {
        let items = self.list_inventory().await?;
        Ok(inventory_overview(&items, search_term, order, &self.policy))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
