//! # Store Traits
//!
//! The persistence contract the lifecycle layer is written against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LifecycleController                                                    │
//! │       │  Arc<dyn GroceryStore>, Arc<dyn InventoryStore>                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────┐    ┌───────────────────────┐                │
//! │  │ GroceryRepository     │    │ InventoryRepository   │   SQLite       │
//! │  └───────────────────────┘    └───────────────────────┘                │
//! │  (tests wrap these or provide their own implementations)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stores hold no business rules. They write exactly what they are given,
//! bump `version` on every write, and report absence as `None` / `false`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pantry_core::{GroceryChanges, GroceryFlags, GroceryItem, InventoryItem, NewInventoryItem};

use crate::error::DbResult;

/// Filter for grocery lookups. `None` leaves a flag unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroceryQuery {
    pub completed: Option<bool>,
    pub archived: Option<bool>,
}

impl GroceryQuery {
    /// Neither completed nor archived.
    pub const PENDING: GroceryQuery = GroceryQuery {
        completed: Some(false),
        archived: Some(false),
    };

    /// Still on the shopping list.
    pub const ACTIVE: GroceryQuery = GroceryQuery {
        completed: None,
        archived: Some(false),
    };

    pub const ARCHIVED: GroceryQuery = GroceryQuery {
        completed: None,
        archived: Some(true),
    };
}

/// Ordering by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl RecordOrder {
    pub(crate) fn sql(&self) -> &'static str {
        match self {
            RecordOrder::NewestFirst => "DESC",
            RecordOrder::OldestFirst => "ASC",
        }
    }
}

/// Storage for the shopping list.
#[async_trait]
pub trait GroceryStore: Send + Sync {
    /// Items matching `query`, ordered by `date_added`.
    async fn find(&self, query: GroceryQuery, order: RecordOrder) -> DbResult<Vec<GroceryItem>>;

    async fn find_by_id(&self, id: &str) -> DbResult<Option<GroceryItem>>;

    /// Inserts a fully-formed record and returns it as stored.
    async fn insert(&self, item: &GroceryItem) -> DbResult<GroceryItem>;

    /// Overwrites the mutable fields of one item. `None` if `id` is absent.
    async fn update_one(&self, id: &str, changes: &GroceryChanges)
        -> DbResult<Option<GroceryItem>>;

    /// Sets `flags` on every listed item that does not already carry them.
    ///
    /// Returns how many items changed. Applying the same ids twice changes
    /// nothing the second time.
    async fn update_many(&self, ids: &[String], flags: GroceryFlags) -> DbResult<u64>;

    /// Removes one item. `false` if `id` is absent.
    async fn delete_one(&self, id: &str) -> DbResult<bool>;
}

/// Storage for the inventory ledger.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All items, ordered by `created_at`.
    async fn find(&self, order: RecordOrder) -> DbResult<Vec<InventoryItem>>;

    /// Inserts a fully-formed record and returns it as stored.
    async fn insert(&self, item: &InventoryItem) -> DbResult<InventoryItem>;

    /// Replaces every mutable field of one item and sets `updated_at`.
    /// `created_at` is left as stored. `None` if `id` is absent.
    async fn update_one(
        &self,
        id: &str,
        item: &NewInventoryItem,
        updated_at: DateTime<Utc>,
    ) -> DbResult<Option<InventoryItem>>;

    /// Removes one item. `false` if `id` is absent.
    async fn delete_one(&self, id: &str) -> DbResult<bool>;
}
